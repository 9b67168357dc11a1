//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use mxdraft::{MxdraftError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for MxdraftError {
    fn from(err: ConfigError) -> Self {
        MxdraftError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (mxdraft/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, MxdraftError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("mxdraft/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "mxdraft", "mxdraft") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - The background colour is not a colour
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, MxdraftError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .model()
        .background()
        .map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use mxdraft::style::ShapeCategory;

    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r##"
            [file]
            host = "mxdraft"

            [model]
            dx = 1280
            page_height = 1000
            grid = false
            background = "#fafafa"

            [styles]
            connector = "endArrow=open;"
            composite-state = "swimlane;"

            [validation]
            strict = true
            "##,
        );

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.file().host(), "mxdraft");
        assert_eq!(config.model().dx(), 1280);
        assert_eq!(config.model().dy(), 900);
        assert_eq!(config.model().page_height(), 1000);
        assert!(!config.model().grid());
        assert_eq!(config.model().background(), Ok("#fafafa"));
        assert_eq!(
            config.styles()[&ShapeCategory::Connector].as_str(),
            "endArrow=open;"
        );
        assert_eq!(
            config.styles()[&ShapeCategory::CompositeState].as_str(),
            "swimlane;"
        );
        assert!(config.validation().strict());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let (_dir, path) = write_config("");

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.file().host(), "app.diagrams.net");
        assert!(config.styles().is_empty());
        assert!(!config.validation().strict());
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(MxdraftError::Config(_))));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let (_dir, path) = write_config("[styles]\nhexagon = \"shape=hexagon;\"\n");
        let result = load_config(Some(&path));
        assert!(matches!(result, Err(MxdraftError::Config(_))));
    }

    #[test]
    fn test_invalid_background_is_rejected() {
        let (_dir, path) = write_config("[model]\nbackground = \"blurple-ish\"\n");
        let result = load_config(Some(&path));
        assert!(matches!(result, Err(MxdraftError::Config(msg)) if msg.contains("blurple-ish")));
    }
}
