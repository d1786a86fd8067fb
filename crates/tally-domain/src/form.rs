//! Entry-form input and the validated draft it produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::ValidationError;
use crate::transaction::{TransactionId, TransactionKind};

/// Validated field set used to create or replace a transaction.
///
/// `date` and `id` are optional: a missing date means "now" on creation and
/// "keep the existing date" on edit, a missing id means "issue a fresh one".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,
}

impl TransactionDraft {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            date: None,
            id: None,
        }
    }

    pub fn income(amount: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(TransactionKind::Income, amount, category, description)
    }

    pub fn expense(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(TransactionKind::Expense, amount, category, description)
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks the record-level constraints shared by create and edit.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.amount.is_finite() {
            return Err(ValidationError::InvalidAmount(self.amount.to_string()));
        }
        if self.amount < 0.0 {
            return Err(ValidationError::NegativeAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyField("category"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyField("description"));
        }
        Ok(())
    }
}

/// Raw submission from the entry surface, every field still text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    #[serde(default, rename = "editId", skip_serializing_if = "Option::is_none")]
    pub edit_id: Option<String>,
}

/// Result of parsing a [`TransactionForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedForm {
    pub draft: TransactionDraft,
    pub edit_id: Option<TransactionId>,
}

impl TransactionForm {
    pub fn new(
        kind: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            edit_id: None,
        }
    }

    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.edit_id = Some(id.into());
        self
    }

    /// Converts the raw text into a validated draft.
    pub fn parse(&self) -> Result<ParsedForm, ValidationError> {
        let kind: TransactionKind = self.kind.parse()?;
        let raw_amount = self.amount.trim();
        let amount: f64 = raw_amount
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(raw_amount.to_string()))?;
        let draft = TransactionDraft::new(
            kind,
            amount,
            self.category.trim(),
            self.description.trim(),
        );
        draft.validate()?;
        let edit_id = match self.edit_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse()?),
            _ => None,
        };
        Ok(ParsedForm { draft, edit_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_validates_fields() {
        let form = TransactionForm::new("expense", " 12.50 ", "  Food ", " Lunch ");
        let parsed = form.parse().expect("valid form");
        assert_eq!(parsed.draft.kind, TransactionKind::Expense);
        assert_eq!(parsed.draft.amount, 12.5);
        assert_eq!(parsed.draft.category, "Food");
        assert_eq!(parsed.draft.description, "Lunch");
        assert!(parsed.edit_id.is_none());
    }

    #[test]
    fn parse_rejects_non_numeric_amount() {
        let form = TransactionForm::new("income", "abc", "Salary", "May");
        assert_eq!(
            form.parse().unwrap_err(),
            ValidationError::InvalidAmount("abc".into())
        );
    }

    #[test]
    fn parse_rejects_nan_and_negative_amounts() {
        let nan = TransactionForm::new("income", "NaN", "Salary", "May");
        assert!(matches!(
            nan.parse(),
            Err(ValidationError::InvalidAmount(_))
        ));
        let negative = TransactionForm::new("income", "-5", "Salary", "May");
        assert_eq!(
            negative.parse().unwrap_err(),
            ValidationError::NegativeAmount(-5.0)
        );
    }

    #[test]
    fn parse_rejects_missing_category() {
        let form = TransactionForm::new("expense", "3", "   ", "Coffee");
        assert_eq!(
            form.parse().unwrap_err(),
            ValidationError::EmptyField("category")
        );
    }

    #[test]
    fn parse_reads_edit_id() {
        let id = TransactionId::new();
        let form = TransactionForm::new("expense", "60", "Food", "Lunch").editing(id.to_string());
        assert_eq!(form.parse().unwrap().edit_id, Some(id));

        let blank = TransactionForm::new("expense", "60", "Food", "Lunch").editing("  ");
        assert_eq!(blank.parse().unwrap().edit_id, None);

        let broken = TransactionForm::new("expense", "60", "Food", "Lunch").editing("42");
        assert!(matches!(broken.parse(), Err(ValidationError::InvalidId(_))));
    }

    #[test]
    fn zero_amount_is_allowed() {
        assert!(TransactionDraft::expense(0.0, "Misc", "Free sample")
            .validate()
            .is_ok());
    }
}
