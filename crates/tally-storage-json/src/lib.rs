use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tally_core::{storage::KeyValueStore, CoreError};
use tracing::{debug, warn};

/// File name of the key-value document inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed key-value store.
///
/// Every key lives in one JSON object of string values, `<dir>/storage.json`.
/// Each write rewrites the whole document atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens (or prepares) the store inside `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Self::at_path(dir.join(STORAGE_FILE))
    }

    /// Opens the store backed by an explicit file path.
    pub fn at_path(path: PathBuf) -> Result<Self, CoreError> {
        let entries = if path.exists() {
            read_entries(&path)?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "json store opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), CoreError> {
        let data = serde_json::to_string_pretty(&self.entries)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            warn!(key, error = %err, "json store write failed");
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.flush() {
            self.entries.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| {
        CoreError::Persistence(format!(
            "storage file {} is malformed: {err}",
            path.display()
        ))
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
