//! Settings are replaced wholesale through a validated save flow; nothing
//! else in the system mutates them.

use tracing::info;

use crate::domain::app_data::AppData;
use crate::domain::settings::Settings;
use crate::errors::Result;

pub struct SettingsService;

impl SettingsService {
    /// Validates and applies new settings. On a validation failure the
    /// existing settings are left untouched.
    pub fn save(data: &mut AppData, new_settings: Settings) -> Result<()> {
        new_settings.validate()?;
        data.settings = new_settings;
        info!("settings saved");
        Ok(())
    }
}
