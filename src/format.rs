//! Display helpers for money amounts and transaction dates.

use std::fmt;

use chrono::{DateTime, TimeZone};
use tally_domain::Transaction;

const GROUPING_SEPARATOR: char = ',';
const DATE_FORMAT: &str = "%b %d, %Y, %I:%M %p";

/// Formats `amount` with two decimals, digit grouping and the currency symbol.
///
/// Negative values put the sign before the symbol: `-$5.00`.
pub fn format_money(amount: f64, symbol: &str) -> String {
    let body = format_number(amount.abs());
    if amount < 0.0 && body != "0.00" {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Formats a transaction amount with an explicit `+` for income and `-` for expenses.
pub fn format_signed(transaction: &Transaction, symbol: &str) -> String {
    let sign = if transaction.is_income() { '+' } else { '-' };
    format!("{sign}{}", format_money(transaction.amount, symbol))
}

/// Renders a timestamp as `May 01, 2024, 02:30 PM` in the timestamp's own zone.
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.format(DATE_FORMAT).to_string()
}

fn format_number(value: f64) -> String {
    let body = format!("{:.2}", value);
    match body.find('.') {
        Some(pos) => format!("{}{}", group_digits(&body[..pos]), &body[pos..]),
        None => group_digits(&body),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUPING_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}
