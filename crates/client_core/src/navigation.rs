//! Selected dashboard tab and add-transaction overlay visibility.
//!
//! The two axes are independent: every (tab, overlay) pair is a valid state
//! and every operation is total.

use serde::Serialize;
use shared::domain::Tab;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlayState {
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub tab: Tab,
    pub overlay: OverlayState,
}

pub struct NavigationController {
    state: watch::Sender<NavigationState>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        let (state, _) = watch::channel(NavigationState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> NavigationState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.state.subscribe()
    }

    pub fn stream(&self) -> WatchStream<NavigationState> {
        WatchStream::new(self.subscribe())
    }

    pub fn select_tab(&self, tab: Tab) {
        let changed = self.state.send_if_modified(|state| {
            let changed = state.tab != tab;
            state.tab = tab;
            changed
        });
        if changed {
            debug!(tab = tab.route(), "nav: tab selected");
        }
    }

    pub fn show_add_transaction_overlay(&self) {
        self.set_overlay_visible(true);
    }

    pub fn dismiss_add_transaction_overlay(&self) {
        self.set_overlay_visible(false);
    }

    fn set_overlay_visible(&self, visible: bool) {
        let changed = self.state.send_if_modified(|state| {
            let changed = state.overlay.visible != visible;
            state.overlay.visible = visible;
            changed
        });
        if changed {
            debug!(visible, "nav: add-transaction overlay toggled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_home_with_overlay_hidden() {
        let nav = NavigationController::new();
        assert_eq!(
            nav.snapshot(),
            NavigationState {
                tab: Tab::Home,
                overlay: OverlayState { visible: false },
            }
        );
    }

    #[test]
    fn select_tab_only_touches_the_tab() {
        for visible in [false, true] {
            for tab in Tab::ALL {
                let nav = NavigationController::new();
                if visible {
                    nav.show_add_transaction_overlay();
                }
                nav.select_tab(tab);
                let state = nav.snapshot();
                assert_eq!(state.tab, tab);
                assert_eq!(state.overlay.visible, visible);
            }
        }
    }

    #[test]
    fn overlay_toggles_leave_the_tab_alone() {
        for tab in Tab::ALL {
            let nav = NavigationController::new();
            nav.select_tab(tab);

            nav.show_add_transaction_overlay();
            assert_eq!(nav.snapshot().tab, tab);
            assert!(nav.snapshot().overlay.visible);

            nav.dismiss_add_transaction_overlay();
            assert_eq!(nav.snapshot().tab, tab);
            assert!(!nav.snapshot().overlay.visible);
        }
    }

    #[test]
    fn redundant_writes_do_not_notify_subscribers() {
        let nav = NavigationController::new();
        let mut rx = nav.subscribe();

        nav.select_tab(Tab::Home);
        nav.dismiss_add_transaction_overlay();
        assert!(!rx.has_changed().expect("sender alive"));

        nav.select_tab(Tab::Reports);
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(rx.borrow_and_update().tab, Tab::Reports);
    }

    #[tokio::test]
    async fn subscribers_observe_emissions_in_order() {
        use tokio_stream::StreamExt;

        let nav = NavigationController::new();
        let mut rx = nav.subscribe();

        nav.select_tab(Tab::Finance);
        rx.changed().await.expect("sender alive");
        assert_eq!(rx.borrow_and_update().tab, Tab::Finance);

        nav.show_add_transaction_overlay();
        rx.changed().await.expect("sender alive");
        let state = *rx.borrow_and_update();
        assert_eq!(state.tab, Tab::Finance);
        assert!(state.overlay.visible);

        let mut stream = nav.stream();
        let first = stream.next().await.expect("initial value");
        assert!(first.overlay.visible);
    }
}
