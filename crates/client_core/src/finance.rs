use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use shared::{
    domain::{Transaction, TransactionKind},
    error::{DataLoadError, Screen},
};
use tokio::sync::watch;
use tracing::debug;

use crate::{
    async_result::AsyncResult,
    config::ShellConfig,
    screen_data::{LoadOutcome, ScreenDataController, ScreenDataSource},
    signal::{OneShotSignal, SignalSubscription},
};

/// Emitted when the user asks to add a transaction from the finance screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddTransactionRequested;

pub fn fixture_transactions(today: NaiveDate) -> Vec<Transaction> {
    vec![
        Transaction::new("1", "Coffee Shop", dec!(-5.75), today, TransactionKind::Expense),
        Transaction::new("2", "Paycheck", dec!(2500.00), today, TransactionKind::Income),
        Transaction::new("3", "Groceries", dec!(-120.50), today, TransactionKind::Expense),
        Transaction::new("4", "Electric Bill", dec!(-75.20), today, TransactionKind::Expense),
        Transaction::new("5", "Freelance Gig", dec!(300.00), today, TransactionKind::Income),
    ]
}

pub struct FinanceFixtureSource {
    latency: Duration,
    today: NaiveDate,
}

impl FinanceFixtureSource {
    pub fn new(latency: Duration, today: NaiveDate) -> Self {
        Self { latency, today }
    }
}

#[async_trait]
impl ScreenDataSource<Vec<Transaction>> for FinanceFixtureSource {
    fn screen(&self) -> Screen {
        Screen::Finance
    }

    async fn fetch(&self) -> Result<Vec<Transaction>, DataLoadError> {
        tokio::time::sleep(self.latency).await;
        Ok(fixture_transactions(self.today))
    }
}

/// Transaction list plus the add-transaction request signal.
pub struct FinanceController {
    data: ScreenDataController<Vec<Transaction>>,
    add_transaction: OneShotSignal<AddTransactionRequested>,
}

impl FinanceController {
    pub fn new(config: &ShellConfig, today: NaiveDate) -> Self {
        Self::with_source(
            Arc::new(FinanceFixtureSource::new(config.finance_load_delay, today)),
            config.signal_capacity,
        )
    }

    pub fn with_source(
        source: Arc<dyn ScreenDataSource<Vec<Transaction>>>,
        signal_capacity: usize,
    ) -> Self {
        Self {
            data: ScreenDataController::new(source),
            add_transaction: OneShotSignal::new("add_transaction", signal_capacity),
        }
    }

    pub fn snapshot(&self) -> AsyncResult<Vec<Transaction>> {
        self.data.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncResult<Vec<Transaction>>> {
        self.data.subscribe()
    }

    pub fn load(&self) -> LoadOutcome {
        self.data.load()
    }

    pub fn subscribe_add_transaction(&self) -> SignalSubscription<AddTransactionRequested> {
        self.add_transaction.subscribe()
    }

    /// Fires the request to whoever is listening right now; returns the number
    /// of listeners reached.
    pub fn request_add_transaction(&self) -> usize {
        let delivered = self.add_transaction.emit(AddTransactionRequested);
        debug!(delivered, "finance: add transaction requested");
        delivered
    }

    pub fn dispose(self) {
        self.data.dispose();
    }
}

#[cfg(test)]
#[path = "tests/finance_tests.rs"]
mod tests;
