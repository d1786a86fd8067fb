//! Presentation-independent view settings: the list filter and colour theme.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::common::ValidationError;
use crate::transaction::{Transaction, TransactionKind};

/// Narrows which transactions are projected for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Income,
    Expense,
}

impl Filter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Filter::All => true,
            Filter::Income => transaction.kind == TransactionKind::Income,
            Filter::Expense => transaction.kind == TransactionKind::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Income => "income",
            Filter::Expense => "expense",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "income" => Ok(Filter::Income),
            "expense" => Ok(Filter::Expense),
            _ => Err(ValidationError::UnknownFilter(value.trim().to_string())),
        }
    }
}

/// Colour theme preference stored next to the transaction log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ValidationError::UnknownTheme(value.trim().to_string())),
        }
    }
}
