//! Plain-text and JSON views of controller state.

use std::fmt::Write as _;

use client_core::{AsyncResult, DashboardSession, LoginFormState, NavigationState};
use serde::Serialize;
use shared::{
    domain::{HomeSummary, Tab, Transaction, TransactionKind},
    format::format_currency,
};

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreenView<T> {
    Loading,
    Ready { data: T },
    Failed { reason: String },
}

impl<T: Clone> From<&AsyncResult<T>> for ScreenView<T> {
    fn from(value: &AsyncResult<T>) -> Self {
        match value {
            AsyncResult::Loading => ScreenView::Loading,
            AsyncResult::Ready(data) => ScreenView::Ready { data: data.clone() },
            AsyncResult::Failed(err) => ScreenView::Failed {
                reason: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub navigation: NavigationState,
    pub home: ScreenView<HomeSummary>,
    pub finance: ScreenView<Vec<Transaction>>,
}

impl DashboardView {
    pub fn capture(dashboard: &DashboardSession) -> Self {
        Self {
            navigation: dashboard.navigation().snapshot(),
            home: ScreenView::from(&dashboard.home().snapshot()),
            finance: ScreenView::from(&dashboard.finance().snapshot()),
        }
    }
}

pub fn render_login(form: &LoginFormState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Sign in ==");
    let _ = writeln!(out, "email:    {}", form.identifier);
    let _ = writeln!(out, "password: {}", "*".repeat(form.secret.chars().count()));
    if form.is_submitting {
        let _ = writeln!(out, "[signing in...]");
    }
    if let Some(error) = &form.error {
        let _ = writeln!(out, "! {error}");
    }
    out
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let tabs: Vec<String> = Tab::ALL
        .into_iter()
        .map(|tab| {
            if tab == view.navigation.tab {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));

    match view.navigation.tab {
        Tab::Home => render_home(&mut out, &view.home),
        Tab::Finance => render_finance(&mut out, &view.finance),
        Tab::Reports => {
            let _ = writeln!(out, "Reports coming soon.");
        }
        Tab::Profile => {
            let _ = writeln!(out, "Profile");
        }
    }

    if view.navigation.overlay.visible {
        let _ = writeln!(out, "+-- Add Transaction --+");
        let _ = writeln!(out, "| Add Transaction Form |");
        let _ = writeln!(out, "+----------------------+");
    }
    out
}

fn render_home(out: &mut String, home: &ScreenView<HomeSummary>) {
    match home {
        ScreenView::Loading => {
            let _ = writeln!(out, "Loading summary...");
        }
        ScreenView::Ready { data } => {
            let _ = writeln!(out, "Period:  {}", data.date_range_text());
            let _ = writeln!(out, "Income:  {}", format_currency(data.income()));
            let _ = writeln!(out, "Expense: {}", format_currency(data.expense()));
            let _ = writeln!(out, "Net:     {}", format_currency(data.net()));
        }
        ScreenView::Failed { reason } => {
            let _ = writeln!(out, "Could not load summary: {reason}");
        }
    }
}

fn render_finance(out: &mut String, finance: &ScreenView<Vec<Transaction>>) {
    match finance {
        ScreenView::Loading => {
            let _ = writeln!(out, "Loading transactions...");
        }
        ScreenView::Ready { data } if data.is_empty() => {
            let _ = writeln!(out, "No transactions yet.");
        }
        ScreenView::Ready { data } => {
            for tx in data {
                let marker = match tx.kind {
                    TransactionKind::Income => '+',
                    TransactionKind::Expense => '-',
                };
                let _ = writeln!(
                    out,
                    "{marker} {:<16} {:>12}  {}",
                    tx.title,
                    format_currency(tx.amount),
                    tx.occurred_on.format("%b %-d, %Y")
                );
            }
        }
        ScreenView::Failed { reason } => {
            let _ = writeln!(out, "Could not load transactions: {reason}");
        }
    }
}
