pub mod status;
pub mod track;

use crate::core::settings::Settings;
use anyhow::Result;

/// Loads the config file and layers command-line overrides on top.
fn load_settings(base_url: Option<String>, interval_ms: Option<u64>) -> Result<Settings> {
    let mut settings = Settings::load()?;
    apply_overrides(&mut settings, base_url, interval_ms);
    settings.validate()?;
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, base_url: Option<String>, interval_ms: Option<u64>) {
    if let Some(base_url) = base_url {
        settings.server.base_url = base_url;
    }
    if let Some(interval_ms) = interval_ms {
        settings.polling.interval_ms = interval_ms;
    }
}

/// Points the config lookup at an empty directory so `Settings::load`
/// falls back to defaults.
#[cfg(test)]
pub(crate) fn use_default_config() {
    let dir = std::env::temp_dir().join("harvest-watch-cli-tests");
    std::fs::create_dir_all(&dir).unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir);
}
