use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use shared::{
    domain::{first_of_month, HomeSummary},
    error::{DataLoadError, Screen},
};
use tokio::sync::watch;
use tracing::info;

use crate::{
    async_result::AsyncResult,
    config::ShellConfig,
    screen_data::{LoadOutcome, ScreenDataController, ScreenDataSource},
};

/// Fixed month-to-date totals served after a simulated latency.
pub struct HomeFixtureSource {
    latency: Duration,
    today: NaiveDate,
}

impl HomeFixtureSource {
    pub fn new(latency: Duration, today: NaiveDate) -> Self {
        Self { latency, today }
    }
}

#[async_trait]
impl ScreenDataSource<HomeSummary> for HomeFixtureSource {
    fn screen(&self) -> Screen {
        Screen::Home
    }

    async fn fetch(&self) -> Result<HomeSummary, DataLoadError> {
        tokio::time::sleep(self.latency).await;
        HomeSummary::new(
            dec!(5230.50),
            dec!(1845.20),
            first_of_month(self.today),
            self.today,
        )
        .map_err(|err| DataLoadError::new(Screen::Home, err.to_string()))
    }
}

pub struct HomeController {
    data: ScreenDataController<HomeSummary>,
    today: NaiveDate,
}

impl HomeController {
    pub fn new(config: &ShellConfig, today: NaiveDate) -> Self {
        Self::with_source(
            Arc::new(HomeFixtureSource::new(config.home_load_delay, today)),
            today,
        )
    }

    pub fn with_source(source: Arc<dyn ScreenDataSource<HomeSummary>>, today: NaiveDate) -> Self {
        Self {
            data: ScreenDataController::new(source),
            today,
        }
    }

    pub fn snapshot(&self) -> AsyncResult<HomeSummary> {
        self.data.snapshot()
    }

    /// Loaded totals, or zeroes over this month so far while they are pending.
    pub fn summary_or_placeholder(&self) -> HomeSummary {
        self.data
            .snapshot()
            .data_or_else(|| HomeSummary::month_to_date(self.today))
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncResult<HomeSummary>> {
        self.data.subscribe()
    }

    pub fn load(&self) -> LoadOutcome {
        self.data.load()
    }

    // No date picker exists yet; the click is only recorded.
    pub fn on_date_range_clicked(&self) {
        let range = self
            .data
            .snapshot()
            .data()
            .map(HomeSummary::date_range_text);
        info!(range = ?range, "home: date range chip clicked");
    }

    pub fn dispose(self) {
        self.data.dispose();
    }
}
