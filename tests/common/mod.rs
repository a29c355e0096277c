use std::sync::Mutex;

use chrono::NaiveDate;
use mdm_register::core::services::EntryService;
use mdm_register::domain::{AppData, EntryDraft, PerCategory};
use mdm_register::storage::AppStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated store backed by a unique directory for each test.
#[allow(dead_code)]
pub fn setup_store() -> AppStore {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    AppStore::new(Some(base), Some(3)).expect("create app store")
}

/// Saves a served-meal entry for the given date at the current rates.
#[allow(dead_code)]
pub fn add_entry(data: &mut AppData, date: NaiveDate, present: PerCategory<u32>) {
    EntryService::save(
        data,
        EntryDraft {
            date,
            present,
            reason_for_no_meal: None,
        },
        false,
    )
    .expect("save entry");
}

#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
