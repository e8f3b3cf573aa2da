mod loader;
mod settings;

pub use loader::{load_config, LoadedConfig, ProfileConfig, RenteaseConfig, CONFIG_FILE_NAME};
pub use settings::{
    HarnessSettings, SettingsOverrides, DEFAULT_BASE_URL, DEFAULT_PASSWORD, DEFAULT_TIMEOUT_SECS,
};
