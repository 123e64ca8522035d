//! First-run setup of the data directory

use crate::config::paths::PantryPaths;
use crate::config::settings::Settings;
use crate::error::PantryError;

use super::Storage;

/// Prepare a fresh installation
///
/// Creates the directories, persists the settings (and with them the owner
/// id) if none exist yet, and writes empty data files so later loads see a
/// consistent layout. Existing files are left untouched.
pub fn initialize_storage(paths: &PantryPaths) -> Result<Settings, PantryError> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
        tracing::info!(path = %paths.settings_file().display(), "created settings");
    }

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    storage.save_all()?;

    Ok(settings)
}
