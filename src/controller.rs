//! Application controller: owns the tracker state and turns typed commands
//! into store mutations, saves and re-renders.

use std::sync::Arc;

use tally_config::{Config, SaveFailurePolicy};
use tally_core::{
    storage::{KeyValueStore, TransactionRepository},
    CategoryBreakdown, ChartSeries, Clock, CoreError, ProjectionService, SummaryService, Totals,
    TransactionStore,
};
use tally_domain::{
    Filter, Theme, Transaction, TransactionDraft, TransactionForm, TransactionId,
};
use tracing::{debug, info, warn};

use crate::errors::AppError;

const DELETE_PROMPT: &str = "Are you sure you want to delete this transaction?";

/// Mutable session state owned by the controller.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: TransactionStore,
    pub filter: Filter,
    pub theme: Theme,
}

/// A user intent accepted by [`AppController::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddTransaction(TransactionDraft),
    EditTransaction {
        id: TransactionId,
        draft: TransactionDraft,
    },
    DeleteTransaction(TransactionId),
    SetFilter(Filter),
    ToggleTheme,
    SetTheme(Theme),
}

impl Command {
    /// Maps an entry-form submission to an add, or an edit when the form carries an edit id.
    pub fn from_form(form: &TransactionForm) -> Result<Self, CoreError> {
        let parsed = form.parse()?;
        Ok(match parsed.edit_id {
            Some(id) => Command::EditTransaction {
                id,
                draft: parsed.draft,
            },
            None => Command::AddTransaction(parsed.draft),
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Command::AddTransaction(_) => "add",
            Command::EditTransaction { .. } => "edit",
            Command::DeleteTransaction(_) => "delete",
            Command::SetFilter(_) => "filter",
            Command::ToggleTheme => "toggle-theme",
            Command::SetTheme(_) => "theme",
        }
    }
}

/// Everything a rendering surface needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub totals: Totals,
    /// Transactions matching the active filter, most recent first.
    pub transactions: Vec<Transaction>,
    /// Expense totals over the whole log, independent of the filter.
    pub breakdown: CategoryBreakdown,
    pub filter: Filter,
    pub theme: Theme,
}

impl DashboardView {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            totals: SummaryService::totals(state.store.list()),
            transactions: ProjectionService::project(state.store.list(), state.filter),
            breakdown: SummaryService::category_breakdown(state.store.list()),
            filter: state.filter,
            theme: state.theme,
        }
    }

    pub fn chart_series(&self) -> ChartSeries {
        self.breakdown.chart_series()
    }
}

/// Output side of the controller: draws views, asks for confirmation and reports errors.
pub trait RenderSurface {
    fn render(&mut self, view: &DashboardView);
    fn confirm(&mut self, prompt: &str) -> bool;
    fn notify_error(&mut self, message: &str);
}

/// Result of a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The command altered the state.
    pub changed: bool,
    /// Storage holds everything currently in memory.
    pub persisted: bool,
}

enum Previous {
    Store(TransactionStore),
    Theme(Theme),
}

/// Drives the tracker: validate, mutate, save, recompute, render.
pub struct AppController<S: KeyValueStore> {
    state: AppState,
    repository: TransactionRepository<S>,
    policy: SaveFailurePolicy,
    pending_log: bool,
    pending_theme: bool,
}

impl<S: KeyValueStore> AppController<S> {
    /// Restores the log and theme from `store` and applies the configured filter and policy.
    pub fn open(store: S, clock: Arc<dyn Clock>, config: &Config) -> Result<Self, AppError> {
        let repository = TransactionRepository::new(store);
        let transactions = repository.load()?;
        let theme = repository.load_theme()?;
        let store = TransactionStore::from_transactions(transactions, clock).map_err(|err| {
            CoreError::Persistence(format!("stored transaction log is invalid: {err}"))
        })?;
        info!(
            transactions = store.len(),
            %theme,
            policy = %config.save_failure,
            "controller opened"
        );
        Ok(Self {
            state: AppState {
                store,
                filter: config.default_filter,
                theme,
            },
            repository,
            policy: config.save_failure,
            pending_log: false,
            pending_theme: false,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn repository(&self) -> &TransactionRepository<S> {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut TransactionRepository<S> {
        &mut self.repository
    }

    /// `true` while a change kept in memory has not reached storage yet.
    pub fn has_unsaved_changes(&self) -> bool {
        self.pending_log || self.pending_theme
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::from_state(&self.state)
    }

    /// Re-renders the current state without touching it.
    pub fn refresh(&self, surface: &mut dyn RenderSurface) {
        surface.render(&self.view());
    }

    /// Parses an entry-form submission and dispatches the resulting add or edit.
    pub fn submit_form(
        &mut self,
        form: &TransactionForm,
        surface: &mut dyn RenderSurface,
    ) -> Result<DispatchOutcome, AppError> {
        match Command::from_form(form) {
            Ok(command) => self.dispatch(command, surface),
            Err(err) => Err(self.reject(err, surface)),
        }
    }

    pub fn dispatch(
        &mut self,
        command: Command,
        surface: &mut dyn RenderSurface,
    ) -> Result<DispatchOutcome, AppError> {
        debug!(command = command.name(), "dispatching command");
        match command {
            Command::AddTransaction(draft) => {
                let previous = self.state.store.clone();
                if let Err(err) = self.state.store.add(draft) {
                    return Err(self.reject(err, surface));
                }
                self.commit(Previous::Store(previous), surface)
            }
            Command::EditTransaction { id, draft } => {
                let previous = self.state.store.clone();
                if let Err(err) = self.state.store.update(id, draft).map(|_| ()) {
                    return Err(self.reject(err, surface));
                }
                self.commit(Previous::Store(previous), surface)
            }
            Command::DeleteTransaction(id) => {
                if !surface.confirm(DELETE_PROMPT) {
                    debug!(%id, "delete declined");
                    return Ok(self.unchanged());
                }
                let previous = self.state.store.clone();
                if self.state.store.remove(id).is_none() {
                    debug!(%id, "delete of unknown transaction ignored");
                    self.refresh(surface);
                    return Ok(self.unchanged());
                }
                self.commit(Previous::Store(previous), surface)
            }
            Command::SetFilter(filter) => {
                let changed = self.state.filter != filter;
                self.state.filter = filter;
                self.refresh(surface);
                Ok(DispatchOutcome {
                    changed,
                    persisted: !self.has_unsaved_changes(),
                })
            }
            Command::ToggleTheme => {
                let previous = self.state.theme;
                self.state.theme = previous.toggled();
                self.commit(Previous::Theme(previous), surface)
            }
            Command::SetTheme(theme) => {
                let previous = self.state.theme;
                if previous == theme {
                    self.refresh(surface);
                    return Ok(self.unchanged());
                }
                self.state.theme = theme;
                self.commit(Previous::Theme(previous), surface)
            }
        }
    }

    fn unchanged(&self) -> DispatchOutcome {
        DispatchOutcome {
            changed: false,
            persisted: !self.has_unsaved_changes(),
        }
    }

    fn reject(&self, err: CoreError, surface: &mut dyn RenderSurface) -> AppError {
        debug!(error = %err, "command rejected");
        surface.notify_error(&err.to_string());
        err.into()
    }

    fn commit(
        &mut self,
        previous: Previous,
        surface: &mut dyn RenderSurface,
    ) -> Result<DispatchOutcome, AppError> {
        let pending = (self.pending_log, self.pending_theme);
        match previous {
            Previous::Store(_) => self.pending_log = true,
            Previous::Theme(_) => self.pending_theme = true,
        }

        let err = match self.flush() {
            Ok(()) => {
                self.refresh(surface);
                return Ok(DispatchOutcome {
                    changed: true,
                    persisted: true,
                });
            }
            Err(err) => err,
        };

        match self.policy {
            SaveFailurePolicy::KeepInMemory => {
                warn!(error = %err, "save failed, change kept in memory");
                surface.notify_error(&format!("Changes could not be saved: {err}"));
                self.refresh(surface);
                Ok(DispatchOutcome {
                    changed: true,
                    persisted: false,
                })
            }
            SaveFailurePolicy::Rollback => {
                match previous {
                    Previous::Store(store) => self.state.store = store,
                    Previous::Theme(theme) => self.state.theme = theme,
                }
                (self.pending_log, self.pending_theme) = pending;
                warn!(error = %err, "save failed, change rolled back");
                surface.notify_error(&format!("Changes were not saved: {err}"));
                Err(err.into())
            }
        }
    }

    fn flush(&mut self) -> Result<(), CoreError> {
        if self.pending_log {
            self.repository.save(self.state.store.list())?;
            self.pending_log = false;
        }
        if self.pending_theme {
            self.repository.save_theme(self.state.theme)?;
            self.pending_theme = false;
        }
        Ok(())
    }
}
