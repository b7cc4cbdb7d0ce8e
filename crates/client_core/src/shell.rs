//! Login gate: shows the dashboard only while a session is open.

use chrono::NaiveDate;
use tracing::debug;

use crate::{auth::AuthSessionController, config::ShellConfig, dashboard::DashboardSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRoute {
    Login,
    Dashboard,
}

pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct AppShell {
    config: ShellConfig,
    clock: fn() -> NaiveDate,
    auth: AuthSessionController,
    dashboard: Option<DashboardSession>,
}

impl AppShell {
    pub fn new(config: ShellConfig) -> Self {
        Self::with_clock(config, local_today)
    }

    pub fn with_clock(config: ShellConfig, clock: fn() -> NaiveDate) -> Self {
        let auth = AuthSessionController::new(&config);
        Self {
            config,
            clock,
            auth,
            dashboard: None,
        }
    }

    pub fn auth(&self) -> &AuthSessionController {
        &self.auth
    }

    pub fn dashboard(&self) -> Option<&DashboardSession> {
        self.dashboard.as_ref()
    }

    pub fn route(&self) -> ShellRoute {
        if self.auth.session().authenticated {
            ShellRoute::Dashboard
        } else {
            ShellRoute::Login
        }
    }

    /// Starts or tears down the dashboard to match the session flag.
    pub fn sync_route(&mut self) -> ShellRoute {
        let route = self.route();
        match (route, self.dashboard.is_some()) {
            (ShellRoute::Dashboard, false) => {
                self.dashboard = Some(DashboardSession::start(&self.config, (self.clock)()));
            }
            (ShellRoute::Login, true) => {
                if let Some(dashboard) = self.dashboard.take() {
                    dashboard.dispose();
                }
            }
            _ => {}
        }
        debug!(?route, "shell: route synced");
        route
    }

    pub fn logout(&mut self) -> ShellRoute {
        self.auth.logout();
        self.sync_route()
    }

    pub fn dispose(mut self) {
        if let Some(dashboard) = self.dashboard.take() {
            dashboard.dispose();
        }
        debug!("shell: disposed");
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
