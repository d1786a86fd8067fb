use std::{env, path::PathBuf};

use crate::errors::AppError;

/// Environment variable overriding the storage and config directory.
pub const HOME_ENV: &str = "TALLY_HOME";
const DEFAULT_DIR_NAME: &str = ".tally";

/// Resolves the application directory: `$TALLY_HOME` when set, else `~/.tally`.
pub fn app_data_dir() -> Result<PathBuf, AppError> {
    if let Some(custom) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(custom));
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or_else(|| AppError::Config("home directory could not be resolved".into()))
}
