//! Whole-blob JSON persistence for `AppData`: atomic writes, timestamped
//! backups with retention, export/import, and reset.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::app_data::AppData;
use crate::errors::{RegisterError, Result};

pub const DATA_FILE_NAME: &str = "register.json";
pub const EXPORT_PREFIX: &str = "MDM_Register";

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;
const DATA_DIR_ENV: &str = "MDM_REGISTER_DATA_DIR";

#[derive(Clone)]
pub struct AppStore {
    root: PathBuf,
    data_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl AppStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(default_base_dir);
        ensure_dir(&root)?;
        let backups_dir = root.join("backups");
        ensure_dir(&backups_dir)?;
        Ok(Self {
            data_file: root.join(DATA_FILE_NAME),
            root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self) -> &Path {
        &self.data_file
    }

    /// Loads the persisted blob; a missing file is a first run and yields
    /// defaults.
    pub fn load(&self) -> Result<AppData> {
        if !self.data_file.exists() {
            return Ok(AppData::default());
        }
        let raw = fs::read_to_string(&self.data_file)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Persists the whole blob atomically, backing up the previous file
    /// first.
    pub fn save(&self, data: &AppData) -> Result<()> {
        if self.data_file.exists() {
            self.backup_existing_file()?;
        }
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(&self.data_file, &json)?;
        Ok(())
    }

    /// Deletes the persisted blob and returns a fresh default state.
    pub fn reset(&self) -> Result<AppData> {
        if self.data_file.exists() {
            fs::remove_file(&self.data_file)?;
        }
        Ok(AppData::default())
    }

    /// Writes the blob into `dir` as
    /// `MDM_Register_<SchoolName>_<YYYY-MM-DD>.json` and returns the path.
    pub fn export(&self, data: &AppData, dir: &Path) -> Result<PathBuf> {
        ensure_dir(dir)?;
        let school = sanitize_file_label(&data.settings.school.name);
        let date = Local::now().date_naive();
        let path = dir.join(format!("{EXPORT_PREFIX}_{school}_{date}.json"));
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(&path, &json)?;
        Ok(path)
    }

    /// Validates and applies an exported file, replacing the current state
    /// wholesale. Existing auth credentials are preserved when the
    /// imported file lacks them. A rejected import mutates nothing.
    pub fn import(&self, data: &mut AppData, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path)
            .map_err(|err| RegisterError::Import(format!("cannot read file: {err}")))?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|err| RegisterError::Import(format!("not valid JSON: {err}")))?;
        AppData::validate_structure(&value)?;
        let mut imported: AppData = serde_json::from_value(value)
            .map_err(|err| RegisterError::Import(format!("malformed payload: {err}")))?;

        if imported.auth.is_none() {
            imported.auth = data.auth.clone();
        }
        *data = imported;
        self.save(data)?;
        Ok(())
    }

    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            entries.push(BackupInfo {
                created_at: parse_backup_timestamp(&name),
                name,
                path,
            });
        }
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    pub fn restore_backup(&self, name: &str) -> Result<AppData> {
        let path = self.backups_dir.join(name);
        if !path.exists() {
            return Err(RegisterError::Storage(format!(
                "backup `{name}` not found"
            )));
        }
        fs::copy(&path, &self.data_file)?;
        self.load()
    }

    fn backup_existing_file(&self) -> Result<()> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut backup_path = self
            .backups_dir
            .join(format!("register_{timestamp}.{BACKUP_EXTENSION}"));
        // Same-millisecond saves get a numeric suffix instead of clobbering
        // the earlier backup.
        let mut bump = 1;
        while backup_path.exists() {
            backup_path = self
                .backups_dir
                .join(format!("register_{timestamp}_{bump}.{BACKUP_EXTENSION}"));
            bump += 1;
        }
        fs::copy(&self.data_file, &backup_path)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(&entry.path);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub name: String,
    pub path: PathBuf,
    pub created_at: Option<DateTime<Utc>>,
}

fn default_base_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join("mdm-register"))
        .unwrap_or_else(|| PathBuf::from(".mdm-register"))
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Keeps ASCII alphanumerics, collapses everything else to `_`.
fn sanitize_file_label(name: &str) -> String {
    let mut label = String::new();
    let mut last_underscore = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            label.push(ch);
            last_underscore = false;
        } else if !label.is_empty() && !last_underscore {
            label.push('_');
            last_underscore = true;
        }
    }
    let trimmed = label.trim_matches('_').to_string();
    if trimmed.is_empty() {
        "School".into()
    } else {
        trimmed
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name
        .strip_prefix("register_")?
        .strip_suffix(&format!(".{BACKUP_EXTENSION}"))?;
    // The stamp is the first two `_` segments; a third is the collision
    // suffix.
    let mut parts = stem.splitn(3, '_');
    let (Some(date), Some(time)) = (parts.next(), parts.next()) else {
        return None;
    };
    NaiveDateTime::parse_from_str(&format!("{date}_{time}"), BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes to a sibling temp file first and renames it into place, so a
/// failed write never leaves a truncated file at `path`.
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (AppStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = AppStore::new(Some(temp.path().to_path_buf()), Some(3)).expect("app store");
        (store, temp)
    }

    #[test]
    fn load_without_file_yields_defaults() {
        let (store, _guard) = store_with_temp_dir();
        let data = store.load().expect("load defaults");
        assert!(data.entries.is_empty());
        assert!(!data.welcome_screen_shown);
    }

    #[test]
    fn save_and_load_round_trip() {
        let (store, _guard) = store_with_temp_dir();
        let mut data = AppData::default();
        data.settings.school.name = "GPS Rampur".into();
        data.welcome_screen_shown = true;
        store.save(&data).expect("save");
        let loaded = store.load().expect("load");
        assert_eq!(loaded, data);
    }

    #[test]
    fn second_save_creates_a_backup() {
        let (store, _guard) = store_with_temp_dir();
        let data = AppData::default();
        store.save(&data).unwrap();
        store.save(&data).unwrap();
        let backups = store.list_backups().unwrap();
        assert!(!backups.is_empty());
    }

    #[test]
    fn rapid_saves_keep_distinct_backups() {
        let (store, _guard) = store_with_temp_dir();
        let data = AppData::default();
        for _ in 0..4 {
            store.save(&data).unwrap();
        }
        let backups = store.list_backups().unwrap();
        assert_eq!(backups.len(), 3, "every prior file must get its own backup");
    }

    #[test]
    fn bumped_backup_names_still_carry_their_timestamp() {
        let plain = parse_backup_timestamp("register_20240401_120000123.json").expect("plain");
        let bumped = parse_backup_timestamp("register_20240401_120000123_2.json").expect("bumped");
        assert_eq!(plain, bumped);
        assert!(parse_backup_timestamp("register_garbage.json").is_none());
    }

    #[test]
    fn export_leaves_no_temp_file_behind() {
        let (store, guard) = store_with_temp_dir();
        let out = guard.path().join("exports");
        let path = store.export(&AppData::default(), &out).unwrap();
        assert!(path.exists());
        let leftovers = fs::read_dir(&out)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.path().extension().and_then(|ext| ext.to_str()) == Some(TMP_SUFFIX)
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn export_names_the_file_after_the_school() {
        let (store, guard) = store_with_temp_dir();
        let mut data = AppData::default();
        data.settings.school.name = "G.P.S. Rampur (Main)".into();
        let path = store.export(&data, guard.path()).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("MDM_Register_G_P_S_Rampur_Main_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn sanitize_collapses_symbols() {
        assert_eq!(sanitize_file_label("  G.P.S. Rampur "), "G_P_S_Rampur");
        assert_eq!(sanitize_file_label("!!!"), "School");
    }

    #[test]
    fn reset_removes_the_persisted_file() {
        let (store, _guard) = store_with_temp_dir();
        store.save(&AppData::default()).unwrap();
        assert!(store.data_path().exists());
        let fresh = store.reset().unwrap();
        assert!(!store.data_path().exists());
        assert_eq!(fresh, AppData::default());
    }
}
