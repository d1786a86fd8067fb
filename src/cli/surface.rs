use colored::{ColoredString, Colorize};
use dialoguer::{theme::ColorfulTheme, Confirm};
use tally_domain::{Theme, Transaction};

use crate::{
    cli::{output, shell::CliMode},
    controller::{DashboardView, RenderSurface},
    format::{format_date, format_money, format_signed},
};

/// Renders dashboards to stdout and asks for confirmation on the terminal.
pub struct TerminalSurface {
    mode: CliMode,
    currency_symbol: String,
    prompt_theme: ColorfulTheme,
}

impl TerminalSurface {
    pub fn new(mode: CliMode, currency_symbol: impl Into<String>) -> Self {
        Self {
            mode,
            currency_symbol: currency_symbol.into(),
            prompt_theme: ColorfulTheme::default(),
        }
    }

    fn money(&self, amount: f64) -> String {
        format_money(amount, &self.currency_symbol)
    }

    fn amount_cell(&self, transaction: &Transaction, theme: Theme) -> ColoredString {
        let text = format_signed(transaction, &self.currency_symbol);
        match (transaction.is_income(), theme) {
            (true, Theme::Light) => text.green(),
            (true, Theme::Dark) => text.bright_green(),
            (false, Theme::Light) => text.red(),
            (false, Theme::Dark) => text.bright_red(),
        }
    }
}

impl RenderSurface for TerminalSurface {
    fn render(&mut self, view: &DashboardView) {
        output::section(format!(
            "Dashboard [filter: {}, theme: {}]",
            view.filter, view.theme
        ));
        output::line(format!("Balance:  {}", self.money(view.totals.balance)));
        output::line(format!("Income:   {}", self.money(view.totals.income)));
        output::line(format!("Expenses: {}", self.money(view.totals.expenses)));

        output::section("Transactions");
        if view.transactions.is_empty() {
            output::line("No transactions to show.");
        }
        for txn in &view.transactions {
            output::line(format!(
                "{}  {}  {:<12} {:<24} {}",
                txn.id,
                format_date(&txn.date.with_timezone(&chrono::Local)),
                txn.category,
                txn.description,
                self.amount_cell(txn, view.theme)
            ));
        }

        output::section("Spending by category");
        if view.breakdown.is_empty() {
            output::line("No expenses recorded.");
        }
        for entry in view.breakdown.entries() {
            output::line(format!("{:<12} {}", entry.category, self.money(entry.amount)));
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.mode == CliMode::Script {
            return true;
        }
        Confirm::with_theme(&self.prompt_theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn notify_error(&mut self, message: &str) {
        output::error(message);
    }
}
