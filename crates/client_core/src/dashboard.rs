use chrono::NaiveDate;
use tracing::info;

use crate::{
    config::ShellConfig, finance::FinanceController, home::HomeController,
    navigation::NavigationController,
};

/// Controllers that live exactly as long as the signed-in dashboard.
pub struct DashboardSession {
    navigation: NavigationController,
    home: HomeController,
    finance: FinanceController,
}

impl DashboardSession {
    /// Builds every dashboard controller; both screen loads begin immediately.
    pub fn start(config: &ShellConfig, today: NaiveDate) -> Self {
        info!(%today, "dashboard: session started");
        Self {
            navigation: NavigationController::new(),
            home: HomeController::new(config, today),
            finance: FinanceController::new(config, today),
        }
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn home(&self) -> &HomeController {
        &self.home
    }

    pub fn finance(&self) -> &FinanceController {
        &self.finance
    }

    pub fn dispose(self) {
        self.home.dispose();
        self.finance.dispose();
        info!("dashboard: session disposed");
    }
}
