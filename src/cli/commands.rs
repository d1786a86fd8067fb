use tally_core::storage::KeyValueStore;
use tally_domain::{Filter, Theme, TransactionForm, TransactionId};
use thiserror::Error;

use crate::{
    cli::output,
    controller::{AppController, Command, DispatchOutcome, RenderSurface},
    errors::AppError,
};

/// Static description of a shell command.
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "add",
        usage: "add <income|expense> <amount> <category> <description...>",
        description: "Record a new transaction",
    },
    CommandEntry {
        name: "edit",
        usage: "edit <id> <income|expense> <amount> <category> <description...>",
        description: "Replace the fields of a transaction",
    },
    CommandEntry {
        name: "delete",
        usage: "delete <id>",
        description: "Remove a transaction after confirmation",
    },
    CommandEntry {
        name: "filter",
        usage: "filter <all|income|expense>",
        description: "Choose which transactions are listed",
    },
    CommandEntry {
        name: "theme",
        usage: "theme [light|dark]",
        description: "Toggle or set the colour theme",
    },
    CommandEntry {
        name: "show",
        usage: "show",
        description: "Print the dashboard",
    },
    CommandEntry {
        name: "help",
        usage: "help [command]",
        description: "List commands or describe one",
    },
    CommandEntry {
        name: "exit",
        usage: "exit",
        description: "Leave the shell",
    },
];

pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|entry| entry.name)
}

pub fn find(name: &str) -> Option<&'static CommandEntry> {
    COMMANDS.iter().find(|entry| entry.name == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("unknown command `{0}`")]
    Unknown(String),
    /// Already reported through the render surface.
    #[error(transparent)]
    App(#[from] AppError),
}

/// Runs one parsed command line against the controller.
pub fn execute<S: KeyValueStore>(
    controller: &mut AppController<S>,
    surface: &mut dyn RenderSurface,
    command: &str,
    args: &[&str],
) -> Result<LoopControl, CommandError> {
    match command {
        "add" => {
            let [kind, amount, category, description @ ..] = args else {
                return Err(usage("add"));
            };
            if description.is_empty() {
                return Err(usage("add"));
            }
            let form = TransactionForm::new(*kind, *amount, *category, description.join(" "));
            let outcome = controller.submit_form(&form, surface)?;
            report(outcome, "Transaction added.");
        }
        "edit" => {
            let [id, kind, amount, category, description @ ..] = args else {
                return Err(usage("edit"));
            };
            if description.is_empty() {
                return Err(usage("edit"));
            }
            let form = TransactionForm::new(*kind, *amount, *category, description.join(" "))
                .editing(*id);
            let outcome = controller.submit_form(&form, surface)?;
            report(outcome, "Transaction updated.");
        }
        "delete" => {
            let [raw] = args else {
                return Err(usage("delete"));
            };
            let id: TransactionId = raw
                .parse()
                .map_err(|err: tally_domain::ValidationError| {
                    CommandError::InvalidArguments(err.to_string())
                })?;
            let outcome = controller.dispatch(Command::DeleteTransaction(id), surface)?;
            if outcome.changed {
                report(outcome, "Transaction deleted.");
            } else {
                output::info("Nothing was deleted.");
            }
        }
        "filter" => {
            let [raw] = args else {
                return Err(usage("filter"));
            };
            let filter: Filter = raw
                .parse()
                .map_err(|err: tally_domain::ValidationError| {
                    CommandError::InvalidArguments(err.to_string())
                })?;
            controller.dispatch(Command::SetFilter(filter), surface)?;
        }
        "theme" => {
            let command = match args {
                [] => Command::ToggleTheme,
                [raw] => Command::SetTheme(raw.parse().map_err(
                    |err: tally_domain::ValidationError| {
                        CommandError::InvalidArguments(err.to_string())
                    },
                )?),
                _ => return Err(usage("theme")),
            };
            let outcome = controller.dispatch(command, surface)?;
            let theme: Theme = controller.state().theme;
            report(outcome, &format!("Theme is now {theme}."));
        }
        "show" => controller.refresh(surface),
        "help" => match args {
            [] => print_overview(),
            [name] => match find(&name.to_lowercase()) {
                Some(entry) => print_command(entry),
                None => return Err(CommandError::Unknown(name.to_string())),
            },
            _ => return Err(usage("help")),
        },
        "exit" | "quit" => return Ok(LoopControl::Exit),
        other => return Err(CommandError::Unknown(other.to_string())),
    }
    Ok(LoopControl::Continue)
}

fn usage(name: &str) -> CommandError {
    let usage = find(name).map(|entry| entry.usage).unwrap_or(name);
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

fn report(outcome: DispatchOutcome, message: &str) {
    if outcome.persisted {
        output::success(message);
    } else {
        output::warning(format!("{message} Not saved yet; it is kept in memory only."));
    }
}

pub fn print_overview() {
    output::section("Available commands");
    for entry in COMMANDS {
        output::line(format!("{:<8} {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::line(format!("Description: {}", entry.description));
    output::line(format!("Usage: {}", entry.usage));
}
