#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use tally::{
    AppController, Config, DashboardView, FixedClock, JsonFileStore, KeyValueStore,
    MemoryKeyValueStore, RenderSurface,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap(),
    ))
}

pub fn memory_controller(config: &Config) -> AppController<MemoryKeyValueStore> {
    open_controller(MemoryKeyValueStore::new(), config)
}

pub fn json_controller(dir: &PathBuf) -> AppController<JsonFileStore> {
    let store = JsonFileStore::open(dir).expect("open json store");
    open_controller(store, &Config::default())
}

pub fn open_controller<S: KeyValueStore>(store: S, config: &Config) -> AppController<S> {
    AppController::open(store, fixed_clock(), config).expect("open controller")
}

/// Surface double that records every callback.
#[derive(Default)]
pub struct RecordingSurface {
    pub views: Vec<DashboardView>,
    pub prompts: Vec<String>,
    pub errors: Vec<String>,
    pub decline: bool,
}

impl RecordingSurface {
    pub fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }

    pub fn last_view(&self) -> &DashboardView {
        self.views.last().expect("at least one render")
    }
}

impl RenderSurface for RecordingSurface {
    fn render(&mut self, view: &DashboardView) {
        self.views.push(view.clone());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        !self.decline
    }

    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
