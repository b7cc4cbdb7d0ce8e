mod config;
mod orchestration;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{AppShell, ShellRoute, SubmitOutcome};
use shared::{
    domain::Tab,
    error::{AuthenticationError, ShellError},
};
use tracing_subscriber::EnvFilter;

use crate::{
    config::load_settings,
    orchestration::{route_add_transaction_requests, trace_session_changes},
    render::{render_dashboard, render_login, DashboardView},
};

/// Drives the finance shell headlessly: sign in, open a tab, optionally
/// raise the add-transaction overlay, then sign out.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "test@app.com")]
    email: String,
    #[arg(long, default_value = "password")]
    password: String,
    /// One of home, finance, reports, profile.
    #[arg(long, default_value = "home")]
    tab: String,
    #[arg(long)]
    open_overlay: bool,
    /// Print dashboard snapshots as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings();
    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let tab = Tab::from_route(&args.tab)
        .with_context(|| format!("unknown tab '{}'", args.tab))?;

    let mut shell = AppShell::new(settings.shell);
    let session_tracer = tokio::spawn(trace_session_changes(shell.auth().session_stream()));

    shell.auth().set_identifier(args.email);
    shell.auth().set_secret(args.password);
    let outcome = shell.auth().submit();
    print!("{}", render_login(&shell.auth().form()));
    check_submission(outcome).context("login rejected")?;

    shell
        .auth()
        .subscribe_form()
        .wait_for(|form| !form.is_submitting)
        .await
        .context("login controller went away while signing in")?;

    if let Err(err) = check_route(shell.sync_route()) {
        print!("{}", render_login(&shell.auth().form()));
        return Err(err).context("login failed");
    }

    let dashboard = shell
        .dashboard()
        .context("dashboard was not started after sign-in")?;
    let mut add_requests = dashboard.finance().subscribe_add_transaction();
    dashboard.navigation().select_tab(tab);

    dashboard
        .home()
        .subscribe()
        .wait_for(|state| !state.is_loading())
        .await
        .context("home controller went away while loading")?;
    dashboard
        .finance()
        .subscribe()
        .wait_for(|state| !state.is_loading())
        .await
        .context("finance controller went away while loading")?;
    print_dashboard(&DashboardView::capture(dashboard), args.json)?;

    if args.open_overlay {
        dashboard.finance().request_add_transaction();
        route_add_transaction_requests(&mut add_requests, dashboard.navigation());
        print_dashboard(&DashboardView::capture(dashboard), args.json)?;
        dashboard.navigation().dismiss_add_transaction_overlay();
    }

    shell.logout();
    print!("{}", render_login(&shell.auth().form()));

    shell.dispose();
    session_tracer.abort();
    Ok(())
}

fn check_submission(outcome: SubmitOutcome) -> Result<(), ShellError> {
    match outcome {
        SubmitOutcome::Rejected(err) => Err(err.into()),
        SubmitOutcome::Started | SubmitOutcome::AlreadyPending => Ok(()),
    }
}

// The form only keeps the display text, so a settled attempt that left us on
// the login route is reported as rejected credentials.
fn check_route(route: ShellRoute) -> Result<(), ShellError> {
    match route {
        ShellRoute::Dashboard => Ok(()),
        ShellRoute::Login => Err(AuthenticationError::InvalidCredentials.into()),
    }
}

fn print_dashboard(view: &DashboardView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", render_dashboard(view));
    }
    Ok(())
}
