//! Persisted operator settings.
//!
//! A small RON file in the working directory remembers the backend origin
//! between runs. Precedence when resolving the origin: command-line flag,
//! then environment, then this file, then the built-in default.

use std::fs;
use std::path::Path;

use deck_logging::deck_warn;
use jobdeck_engine::ClientSettings;
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = ".jobdeck.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSettings {
    api_url: Option<String>,
}

fn load(dir: &Path) -> PersistedSettings {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return PersistedSettings::default();
        }
        Err(err) => {
            deck_warn!("Failed to read settings from {:?}: {}", path, err);
            return PersistedSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            deck_warn!("Failed to parse settings from {:?}: {}", path, err);
            PersistedSettings::default()
        }
    }
}

fn save(dir: &Path, settings: &PersistedSettings) -> anyhow::Result<()> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(settings, pretty)?;
    fs::write(dir.join(SETTINGS_FILENAME), content)?;
    Ok(())
}

/// Persists `api_url` as the default backend origin.
pub fn save_api_url(dir: &Path, api_url: &str) -> anyhow::Result<()> {
    let mut settings = load(dir);
    settings.api_url = Some(api_url.to_string());
    save(dir, &settings)
}

/// Resolves transport settings for this invocation.
pub fn resolve_client_settings(
    flag: Option<String>,
    internal: bool,
    dir: &Path,
) -> ClientSettings {
    if let Some(url) = flag {
        return ClientSettings::default().with_base_url(url);
    }
    if internal {
        return ClientSettings::from_env_internal();
    }
    if std::env::var("JOBDECK_API_URL").is_ok() {
        return ClientSettings::from_env();
    }
    if let Some(url) = load(dir).api_url {
        return ClientSettings::default().with_base_url(url);
    }
    ClientSettings::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobdeck_engine::DEFAULT_BASE_URL;

    #[test]
    fn settings_round_trip_through_the_ron_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        save_api_url(dir.path(), "http://deck.internal:5000").expect("save ok");

        let loaded = load(dir.path());
        assert_eq!(loaded.api_url.as_deref(), Some("http://deck.internal:5000"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(load(dir.path()).api_url, None);
    }

    #[test]
    fn malformed_file_warns_and_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(SETTINGS_FILENAME), "(((not ron").expect("write ok");
        assert_eq!(load(dir.path()).api_url, None);
    }

    #[test]
    fn flag_beats_the_saved_origin() {
        let dir = tempfile::tempdir().expect("tempdir");
        save_api_url(dir.path(), "http://saved:5000").expect("save ok");

        let settings = resolve_client_settings(
            Some("http://flagged:5000".to_string()),
            false,
            dir.path(),
        );
        assert_eq!(settings.base_url, "http://flagged:5000");
    }

    #[test]
    fn saved_origin_beats_the_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        save_api_url(dir.path(), "http://saved:5000").expect("save ok");

        let settings = resolve_client_settings(None, false, dir.path());
        assert_eq!(settings.base_url, "http://saved:5000");
    }

    #[test]
    fn nothing_configured_falls_back_to_localhost() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = resolve_client_settings(None, false, dir.path());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }
}
