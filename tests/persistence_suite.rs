//! Storage guarantees: atomic saves, backups with retention, and the
//! export/import round trip.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{add_entry, date, setup_store};
use mdm_register::core::services::ReceiptService;
use mdm_register::domain::{AppData, AuthState, PerCategory};
use mdm_register::storage::DATA_FILE_NAME;
use tempfile::TempDir;

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

fn sample_data() -> AppData {
    let mut data = AppData::default();
    data.settings.school.name = "GPS Rampur".into();
    add_entry(&mut data, date(2024, 4, 3), PerCategory::new(12, 30, 18));
    ReceiptService::add(
        &mut data,
        date(2024, 4, 1),
        PerCategory::new(25.0, 50.0, 25.0),
        PerCategory::new(500.0, 1000.0, 500.0),
    )
    .expect("receipt");
    data
}

#[test]
fn load_of_missing_file_yields_defaults() {
    let store = setup_store();
    let data = store.load().expect("load");
    assert!(data.entries.is_empty());
    assert!(data.receipts.is_empty());
    assert!(data.settings.school.name.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let store = setup_store();
    let data = sample_data();
    store.save(&data).expect("save");

    let loaded = store.load().expect("load");
    assert_eq!(loaded, data);
}

#[test]
fn failed_atomic_save_preserves_the_original_file() {
    let store = setup_store();
    let mut data = sample_data();
    store.save(&data).expect("initial save");
    let original = fs::read_to_string(store.data_path()).expect("read original");

    // A directory squatting on the temp file name forces File::create to
    // fail before the rename.
    let tmp = tmp_path_for(store.data_path());
    fs::create_dir_all(&tmp).unwrap();

    add_entry(&mut data, date(2024, 4, 4), PerCategory::new(9, 9, 9));
    assert!(store.save(&data).is_err());

    let current = fs::read_to_string(store.data_path()).expect("read after failure");
    assert_eq!(current, original);
}

#[test]
fn every_save_backs_up_the_previous_file_with_retention() {
    let store = setup_store();
    let mut data = sample_data();
    store.save(&data).expect("save 1");

    for day in 5..=10 {
        add_entry(&mut data, date(2024, 4, day), PerCategory::new(1, 1, 1));
        store.save(&data).expect("subsequent save");
    }

    let backups = store.list_backups().expect("list");
    // Retention of 3 configured by the harness; back-to-back saves must not
    // clobber each other's backups before pruning runs.
    assert_eq!(backups.len(), 3, "got {} backups", backups.len());
    for backup in &backups {
        assert!(backup.name.starts_with("register_"));
        assert!(backup.name.ends_with(".json"));
    }
}

#[test]
fn restore_backup_brings_back_the_earlier_state() {
    let store = setup_store();
    let mut data = sample_data();
    store.save(&data).expect("save 1");
    let entries_before = data.entries.len();

    add_entry(&mut data, date(2024, 4, 20), PerCategory::new(5, 5, 5));
    store.save(&data).expect("save 2");

    let backups = store.list_backups().expect("list");
    let restored = store
        .restore_backup(&backups[0].name)
        .expect("restore most recent backup");
    assert_eq!(restored.entries.len(), entries_before);
}

#[test]
fn export_names_the_file_after_school_and_date() {
    let store = setup_store();
    let data = sample_data();
    let out = TempDir::new().unwrap();

    let path = store.export(&data, out.path()).expect("export");
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("MDM_Register_GPS_Rampur_"), "got {name}");
    assert!(name.ends_with(".json"));
}

#[test]
fn export_import_round_trip_preserves_ids() {
    let store = setup_store();
    let data = sample_data();
    let out = TempDir::new().unwrap();
    let exported = store.export(&data, out.path()).expect("export");

    let mut fresh = AppData::default();
    store.import(&mut fresh, &exported).expect("import");

    assert_eq!(fresh.entries, data.entries);
    assert_eq!(fresh.receipts, data.receipts);
    assert_eq!(
        fresh.receipts[0].id, data.receipts[0].id,
        "receipt ids must survive the round trip"
    );
}

#[test]
fn import_preserves_existing_auth_when_file_has_none() {
    let store = setup_store();
    let exported = {
        let data = sample_data();
        let out = TempDir::new().unwrap();
        let path = store.export(&data, out.path()).expect("export");
        let kept = out.path().join("kept.json");
        fs::copy(&path, &kept).unwrap();
        // Keep the temp dir alive through the test by leaking it.
        std::mem::forget(out);
        kept
    };

    let mut current = AppData::default();
    current.auth = Some(AuthState {
        username: "head".into(),
        password_hash: "abc123".into(),
        salt: "s".into(),
    });
    store.import(&mut current, &exported).expect("import");

    let auth = current.auth.expect("auth preserved");
    assert_eq!(auth.username, "head");
}

#[test]
fn import_rejects_files_without_the_expected_shape() {
    let store = setup_store();
    let out = TempDir::new().unwrap();
    let bogus = out.path().join("bogus.json");
    fs::write(&bogus, r#"{"settings": 4, "entries": {}}"#).unwrap();

    let mut data = sample_data();
    let before = data.clone();
    assert!(store.import(&mut data, &bogus).is_err());
    assert_eq!(data, before, "a rejected import must not mutate state");
}

#[test]
fn reset_erases_the_data_file() {
    let store = setup_store();
    store.save(&sample_data()).expect("save");
    assert!(store.data_path().exists());

    let fresh = store.reset().expect("reset");
    assert!(fresh.entries.is_empty());
    assert!(!store.data_path().exists());
    assert_eq!(store.load().expect("load after reset"), AppData::default());

    let file = store.base_dir().join(DATA_FILE_NAME);
    assert_eq!(file, store.data_path());
}
