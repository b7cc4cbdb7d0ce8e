//! Generic loader behind the data-bearing dashboard screens.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};

use async_trait::async_trait;
use shared::error::{DataLoadError, Screen};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::async_result::AsyncResult;

#[async_trait]
pub trait ScreenDataSource<T>: Send + Sync {
    fn screen(&self) -> Screen;
    async fn fetch(&self) -> Result<T, DataLoadError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Started,
    AlreadyLoading,
}

/// Owns one screen's `AsyncResult` and the task that fills it.
///
/// Construction starts the first load, so it must happen inside a tokio
/// runtime. Dropping the controller aborts a load that is still in flight.
///
/// `in_flight` is only flipped while the watch write lock is held, so a
/// subscriber that has seen the result of a load can always start the next one.
pub struct ScreenDataController<T> {
    screen: Screen,
    state: Arc<watch::Sender<AsyncResult<T>>>,
    in_flight: Arc<AtomicBool>,
    source: Arc<dyn ScreenDataSource<T>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> ScreenDataController<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(source: Arc<dyn ScreenDataSource<T>>) -> Self {
        let (state, _) = watch::channel(AsyncResult::Loading);
        let controller = Self {
            screen: source.screen(),
            state: Arc::new(state),
            in_flight: Arc::new(AtomicBool::new(false)),
            source,
            pending: Mutex::new(None),
        };
        controller.load();
        controller
    }

    pub fn snapshot(&self) -> AsyncResult<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncResult<T>> {
        self.state.subscribe()
    }

    /// Enters `Loading` and fetches again, unless a fetch is already running.
    pub fn load(&self) -> LoadOutcome {
        let mut outcome = LoadOutcome::AlreadyLoading;
        self.state.send_if_modified(|state| {
            if self.in_flight.swap(true, Ordering::SeqCst) {
                return false;
            }
            outcome = LoadOutcome::Started;
            if state.is_loading() {
                return false;
            }
            *state = AsyncResult::Loading;
            true
        });
        if outcome == LoadOutcome::AlreadyLoading {
            debug!(screen = self.screen.name(), "screen: load already in flight");
            return outcome;
        }

        let screen = self.screen;
        let state = Arc::clone(&self.state);
        let in_flight = Arc::clone(&self.in_flight);
        let source = Arc::clone(&self.source);
        debug!(screen = screen.name(), "screen: load started");
        let task = tokio::spawn(async move {
            let result = source.fetch().await;
            match &result {
                Ok(_) => info!(screen = screen.name(), "screen: data ready"),
                Err(err) => warn!(screen = screen.name(), reason = %err.reason, "screen: load failed"),
            }
            state.send_modify(|state| {
                in_flight.store(false, Ordering::SeqCst);
                *state = result.into();
            });
        });
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(task);

        outcome
    }

    pub fn dispose(self) {
        debug!(screen = self.screen.name(), "screen: controller disposed");
    }
}

impl<T> Drop for ScreenDataController<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/screen_data_tests.rs"]
mod tests;
