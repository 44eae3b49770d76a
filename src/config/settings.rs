use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "FolderPreview";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("io", "folderpreview", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Loads the application configuration.
///
/// `config_dir` overrides the platform directory. The file is only ever read:
/// if it doesn't exist the defaults are used, and if it cannot be parsed a
/// warning is logged and the defaults are used as well.
pub fn load_config(config_dir: Option<&Path>) -> Result<AppConfig> {
    let config_dir = match config_dir {
        Some(dir) => dir.to_path_buf(),
        None => get_config_directory()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };
    let config_path = config_dir.join(CONFIG_FILE);

    if !config_path.exists() {
        tracing::info!(
            "No config file at {:?}, using default settings",
            config_path
        );
        return Ok(AppConfig::default());
    }

    let config_content = fs::read_to_string(&config_path)?;

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            Ok(AppConfig::default())
        }
    }
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/io.folderpreview.FolderPreview/
// Linux:   ~/.config/folderpreview/
// Windows: %APPDATA%/folderpreview/FolderPreview/config/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::setup_test_logging;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults_without_writing() {
        setup_test_logging();
        let dir = tempdir().unwrap();

        let config = load_config(Some(dir.path())).unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(!dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "dark_mode": true, "tree_width_percent": 40.0 }"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path())).unwrap();

        assert!(config.dark_mode);
        assert_eq!(config.tree_width_percent, 40.0);
        assert_eq!(config.window_size, AppConfig::default().window_size);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let config = load_config(Some(dir.path())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_wrong_field_type_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{ "dark_mode": "yes" }"#).unwrap();

        let config = load_config(Some(dir.path())).unwrap();
        assert!(!config.dark_mode);
    }
}
