use std::{
    borrow::Cow,
    env,
    io::{self, BufRead},
    sync::Arc,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use strsim::levenshtein;
use tally_config::{Config, ConfigManager};
use tally_core::{storage::KeyValueStore, SystemClock};
use tally_storage_json::JsonFileStore;
use thiserror::Error;
use tracing::info;

use crate::{
    cli::{
        commands::{self, CommandError, LoopControl},
        output,
        surface::TerminalSurface,
    },
    controller::AppController,
    errors::AppError,
    paths,
};

/// Environment variable switching the shell to non-interactive stdin mode.
pub const SCRIPT_ENV: &str = "TALLY_CLI_SCRIPT";
const PROMPT: &str = "tally> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let (config, store) = open_storage()?;
    if mode == CliMode::Script || !config.ui_color_enabled {
        colored::control::set_override(false);
    }
    let mut controller = AppController::open(store, Arc::new(SystemClock), &config)?;
    let mut surface = TerminalSurface::new(mode, config.currency_symbol.clone());
    controller.refresh(&mut surface);

    match mode {
        CliMode::Interactive => run_interactive(&mut controller, &mut surface),
        CliMode::Script => run_script(&mut controller, &mut surface),
    }
}

fn open_storage() -> Result<(Config, JsonFileStore), AppError> {
    let base = paths::app_data_dir()?;
    let config = ConfigManager::with_base_dir(base.clone())?.load()?;
    let data_dir = config.resolve_data_dir(base);
    info!(path = %data_dir.display(), "opening storage");
    let store = JsonFileStore::open(&data_dir)?;
    Ok((config, store))
}

fn run_interactive<S: KeyValueStore>(
    controller: &mut AppController<S>,
    surface: &mut TerminalSurface,
) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(commands::names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Type `help` to list commands.");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(controller, surface, trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script<S: KeyValueStore>(
    controller: &mut AppController<S>,
    surface: &mut TerminalSurface,
) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if handle_line(controller, surface, &line) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Parses and executes one line, reporting any failure. Never aborts the loop on error.
pub fn handle_line<S: KeyValueStore>(
    controller: &mut AppController<S>,
    surface: &mut TerminalSurface,
    line: &str,
) -> LoopControl {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return LoopControl::Continue;
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match commands::execute(controller, surface, &command, &args) {
        Ok(control) => control,
        Err(err) => {
            report_error(err);
            LoopControl::Continue
        }
    }
}

fn report_error(err: CommandError) {
    match err {
        CommandError::InvalidArguments(message) => {
            output::error(message);
            output::info("Use `help <command>` for usage details.");
        }
        CommandError::Unknown(name) => {
            output::error(format!("unknown command `{name}`"));
            if let Some(best) = suggest(&name) {
                output::info(format!("Suggestion: `{best}`?"));
            }
        }
        CommandError::App(_) => {}
    }
}

fn suggest(input: &str) -> Option<&'static str> {
    commands::names()
        .map(|name| (levenshtein(name, input), name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: impl Iterator<Item = &'static str>) -> Self {
        let mut commands: Vec<String> = names.map(str::to_string).collect();
        commands.sort();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        if prefix.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let start = prefix.len() - prefix.trim_start().len();
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}
