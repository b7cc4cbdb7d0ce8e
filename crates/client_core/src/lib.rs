//! Observable controllers behind the finance shell: login gate, dashboard
//! navigation and the simulated screen loads.
//!
//! Every controller publishes its state through `tokio::sync::watch` and must
//! be driven from inside a tokio runtime.

pub mod async_result;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod finance;
pub mod home;
pub mod navigation;
pub mod screen_data;
pub mod shell;
pub mod signal;

pub use async_result::AsyncResult;
pub use auth::{AuthSessionController, LoginFormState, SessionState, SubmitOutcome};
pub use config::ShellConfig;
pub use dashboard::DashboardSession;
pub use finance::{AddTransactionRequested, FinanceController};
pub use home::HomeController;
pub use navigation::{NavigationController, NavigationState, OverlayState};
pub use screen_data::{LoadOutcome, ScreenDataController, ScreenDataSource};
pub use shell::{AppShell, ShellRoute};
pub use signal::{OneShotSignal, SignalSubscription};
