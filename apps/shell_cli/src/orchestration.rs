//! Cross-controller wiring that belongs to the presentation side.

use client_core::{
    AddTransactionRequested, NavigationController, SessionState, SignalSubscription,
};
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing::{debug, info};

/// Opens the add-transaction overlay for every request received since the
/// last call. Returns how many requests were consumed.
pub fn route_add_transaction_requests(
    requests: &mut SignalSubscription<AddTransactionRequested>,
    navigation: &NavigationController,
) -> usize {
    let mut consumed = 0;
    while let Some(AddTransactionRequested) = requests.try_recv() {
        navigation.show_add_transaction_overlay();
        consumed += 1;
    }
    if consumed > 0 {
        debug!(consumed, "ui: add-transaction requests routed to overlay");
    }
    consumed
}

pub async fn trace_session_changes(mut sessions: WatchStream<SessionState>) {
    while let Some(session) = sessions.next().await {
        info!(authenticated = session.authenticated, "ui: session state observed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{FinanceController, ShellConfig};
    use shared::domain::Tab;

    fn today() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    #[tokio::test(start_paused = true)]
    async fn request_opens_overlay_without_changing_tab() {
        let finance = FinanceController::new(&ShellConfig::default(), today());
        let navigation = NavigationController::new();
        navigation.select_tab(Tab::Finance);
        let mut requests = finance.subscribe_add_transaction();

        assert_eq!(route_add_transaction_requests(&mut requests, &navigation), 0);
        assert!(!navigation.snapshot().overlay.visible);

        finance.request_add_transaction();
        assert_eq!(route_add_transaction_requests(&mut requests, &navigation), 1);
        let state = navigation.snapshot();
        assert!(state.overlay.visible);
        assert_eq!(state.tab, Tab::Finance);

        assert_eq!(route_add_transaction_requests(&mut requests, &navigation), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn request_fired_before_subscribing_is_not_routed() {
        let finance = FinanceController::new(&ShellConfig::default(), today());
        let navigation = NavigationController::new();

        finance.request_add_transaction();
        let mut requests = finance.subscribe_add_transaction();
        assert_eq!(route_add_transaction_requests(&mut requests, &navigation), 0);
        assert!(!navigation.snapshot().overlay.visible);
    }
}
