use std::time::Duration;

pub const LOGIN_DELAY: Duration = Duration::from_millis(1500);
pub const HOME_LOAD_DELAY: Duration = Duration::from_millis(1500);
pub const FINANCE_LOAD_DELAY: Duration = Duration::from_millis(1000);
pub const SIGNAL_CAPACITY: usize = 16;

/// Simulated latencies and channel sizing shared by every controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub login_delay: Duration,
    pub home_load_delay: Duration,
    pub finance_load_delay: Duration,
    pub signal_capacity: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            login_delay: LOGIN_DELAY,
            home_load_delay: HOME_LOAD_DELAY,
            finance_load_delay: FINANCE_LOAD_DELAY,
            signal_capacity: SIGNAL_CAPACITY,
        }
    }
}
