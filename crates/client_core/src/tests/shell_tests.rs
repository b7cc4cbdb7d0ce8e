use super::*;
use shared::domain::Tab;

use crate::{async_result::AsyncResult, auth::SubmitOutcome};

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

fn shell() -> AppShell {
    AppShell::with_clock(ShellConfig::default(), fixed_today)
}

async fn sign_in(shell: &mut AppShell) {
    shell.auth().set_identifier("test@app.com");
    shell.auth().set_secret("password");
    assert_eq!(shell.auth().submit(), SubmitOutcome::Started);
    let mut session_rx = shell.auth().subscribe_session();
    session_rx
        .wait_for(|session| session.authenticated)
        .await
        .expect("session sender alive");
    assert_eq!(shell.sync_route(), ShellRoute::Dashboard);
}

#[tokio::test(start_paused = true)]
async fn starts_at_login_without_dashboard() {
    let mut shell = shell();
    assert_eq!(shell.route(), ShellRoute::Login);
    assert_eq!(shell.sync_route(), ShellRoute::Login);
    assert!(shell.dashboard().is_none());
}

#[tokio::test(start_paused = true)]
async fn successful_login_opens_dashboard_with_loading_screens() {
    let mut shell = shell();
    sign_in(&mut shell).await;

    let dashboard = shell.dashboard().expect("dashboard started");
    assert_eq!(dashboard.navigation().snapshot().tab, Tab::Home);
    assert!(dashboard.home().snapshot().is_loading());
    assert!(dashboard.finance().snapshot().is_loading());

    let mut home_rx = dashboard.home().subscribe();
    let mut finance_rx = dashboard.finance().subscribe();
    home_rx
        .wait_for(AsyncResult::is_ready)
        .await
        .expect("home sender alive");
    finance_rx
        .wait_for(AsyncResult::is_ready)
        .await
        .expect("finance sender alive");
    assert_eq!(
        dashboard.finance().snapshot().data().map(Vec::len),
        Some(5)
    );
}

#[tokio::test(start_paused = true)]
async fn sync_route_is_idempotent_while_signed_in() {
    let mut shell = shell();
    sign_in(&mut shell).await;
    shell
        .dashboard()
        .expect("dashboard")
        .navigation()
        .select_tab(Tab::Reports);

    assert_eq!(shell.sync_route(), ShellRoute::Dashboard);
    assert_eq!(
        shell.dashboard().expect("dashboard").navigation().snapshot().tab,
        Tab::Reports
    );
}

#[tokio::test(start_paused = true)]
async fn logout_tears_down_dashboard_and_cancels_loads() {
    let mut shell = shell();
    sign_in(&mut shell).await;
    let finance_rx = shell.dashboard().expect("dashboard").finance().subscribe();

    assert_eq!(shell.logout(), ShellRoute::Login);
    assert!(shell.dashboard().is_none());
    assert_eq!(shell.auth().form().identifier, "test@app.com");

    tokio::time::sleep(crate::config::FINANCE_LOAD_DELAY * 2).await;
    assert!(finance_rx.borrow().is_loading());
}

#[tokio::test(start_paused = true)]
async fn fresh_dashboard_after_relogin_starts_from_defaults() {
    let mut shell = shell();
    sign_in(&mut shell).await;
    {
        let dashboard = shell.dashboard().expect("dashboard");
        dashboard.navigation().select_tab(Tab::Finance);
        dashboard.navigation().show_add_transaction_overlay();
    }
    shell.logout();

    sign_in(&mut shell).await;
    let state = shell.dashboard().expect("dashboard").navigation().snapshot();
    assert_eq!(state.tab, Tab::Home);
    assert!(!state.overlay.visible);
    shell.dispose();
}
