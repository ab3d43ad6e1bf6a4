#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use budget_tracker::{
    core::{BudgetSession, Clock, FixedClock, LoadMetadata, SessionOptions},
    domain::MonthIndex,
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn month(text: &str) -> MonthIndex {
    MonthIndex::parse(text).expect("valid month literal")
}

/// Clock pinned to the first day of `text` (`YYYY-MM`).
pub fn clock_at(text: &str) -> Arc<dyn Clock> {
    Arc::new(FixedClock::at_month(month(text)).expect("representable month"))
}

pub fn open_session(dir: &PathBuf, current: &str) -> (BudgetSession, LoadMetadata) {
    let store = JsonFileStore::new(dir).expect("create json store");
    BudgetSession::open(Box::new(store), SessionOptions::default(), clock_at(current))
        .expect("open session")
}
