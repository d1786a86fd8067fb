//! Validation error shared by the domain types.

use std::fmt;

use crate::transaction::TransactionId;

/// Describes why a transaction record was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    UnknownKind(String),
    InvalidAmount(String),
    NegativeAmount(f64),
    EmptyField(&'static str),
    InvalidId(String),
    DuplicateId(TransactionId),
    UnknownFilter(String),
    UnknownTheme(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownKind(value) => {
                write!(f, "unknown transaction type `{value}` (expected income or expense)")
            }
            ValidationError::InvalidAmount(value) => {
                write!(f, "amount `{value}` is not a finite number")
            }
            ValidationError::NegativeAmount(value) => {
                write!(f, "amount must not be negative (got {value})")
            }
            ValidationError::EmptyField(field) => write!(f, "{field} must not be empty"),
            ValidationError::InvalidId(value) => {
                write!(f, "`{value}` is not a valid transaction id")
            }
            ValidationError::DuplicateId(id) => {
                write!(f, "transaction id {id} is already in use")
            }
            ValidationError::UnknownFilter(value) => {
                write!(f, "unknown filter `{value}` (expected all, income or expense)")
            }
            ValidationError::UnknownTheme(value) => {
                write!(f, "unknown theme `{value}` (expected light or dark)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
