use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(TransactionId);

/// Dashboard destinations. Exactly one is selected at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Home,
    Finance,
    Reports,
    Profile,
}

impl Tab {
    /// Tabs in navigation-bar order.
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Finance, Tab::Reports, Tab::Profile];

    pub fn route(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Finance => "finance",
            Tab::Reports => "reports",
            Tab::Profile => "profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Finance => "Finance",
            Tab::Reports => "Reports",
            Tab::Profile => "Profile",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.route().eq_ignore_ascii_case(route.trim()))
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single ledger entry.
///
/// `amount` keeps the sign of the raw record (expenses are usually negative),
/// but `kind` is the classifier consumers must rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub title: String,
    pub amount: Decimal,
    pub occurred_on: NaiveDate,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        amount: Decimal,
        occurred_on: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: TransactionId::new(id),
            title: title.into(),
            amount,
            occurred_on,
            kind,
        }
    }

    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// Totals shown on the home screen for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSummary {
    income: Decimal,
    expense: Decimal,
    range_start: NaiveDate,
    range_end: NaiveDate,
}

impl HomeSummary {
    pub fn new(
        income: Decimal,
        expense: Decimal,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Result<Self, DomainError> {
        if income < Decimal::ZERO {
            return Err(DomainError::NegativeTotal {
                field: "income",
                value: income,
            });
        }
        if expense < Decimal::ZERO {
            return Err(DomainError::NegativeTotal {
                field: "expense",
                value: expense,
            });
        }
        if range_start > range_end {
            return Err(DomainError::InvertedRange {
                start: range_start,
                end: range_end,
            });
        }
        Ok(Self {
            income,
            expense,
            range_start,
            range_end,
        })
    }

    /// Zero totals over the first of `today`'s month through `today`. Shown
    /// while the real totals are loading.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            range_start: first_of_month(today),
            range_end: today,
        }
    }

    pub fn income(&self) -> Decimal {
        self.income
    }

    pub fn expense(&self) -> Decimal {
        self.expense
    }

    pub fn range_start(&self) -> NaiveDate {
        self.range_start
    }

    pub fn range_end(&self) -> NaiveDate {
        self.range_end
    }

    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    /// Short range label, e.g. `Oct 1 - Oct 16`.
    pub fn date_range_text(&self) -> String {
        format!(
            "{} - {}",
            self.range_start.format("%b %-d"),
            self.range_end.format("%b %-d")
        )
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Login form input. Never persisted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}
