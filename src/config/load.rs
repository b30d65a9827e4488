//! The main config loading module for dirview.
//!
//! Handles loading and deserializing settings from `dirview.toml` into the
//! internal [RawConfig] and converting it into the read-only [Config].
//!
//! Also writes the default config file for `dv --init`.

use crate::config::Theme;
use crate::config::{General, InternalGeneral};
use crate::utils::get_home;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "DIRVIEW_CONFIG";

/// Raw configuration as read from the toml file.
/// Converted into the main [Config] struct after parsing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    theme: Theme,
}

/// Processed configuration used by dirview.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    theme: Theme,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            theme: raw.theme,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file gives the defaults silently. A file that cannot be read
    /// or parsed gives the defaults and a warning on stderr.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from `path`, falling back to defaults like [Config::load].
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[dirview] Error parsing config {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[dirview] Cannot read config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let raw: RawConfig = toml::from_str(content)?;
        Ok(raw.into())
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Determine the default configuration file path.
    /// Checks the DIRVIEW_CONFIG environment variable first,
    /// XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/dirview/dirview.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("dirview/dirview.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/dirview/dirview.toml");
        }
        PathBuf::from("dirview.toml")
    }

    /// Write the default configuration file to `path`.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# dirview.toml - default configuration for dirview

# Note:
# Commented values are the internal defaults of dirview.
# Colors are terminal color names ("yellow"), hex codes ("#RRGGBB", "#RGB")
# or 256-color palette indices ("0" to "255").

[general]
# Milliseconds to wait for the rest of an arrow key sequence after ESC (0 to 1000).
# escape_timeout_ms = 50
# Log filter; the DIRVIEW_LOG environment variable takes precedence.
# log_level = "warn"
# log_file = "/tmp/dirview.log"

[theme]
# path = { fg = "200" }
# header = { fg = "198" }
# active_header = { bg = "198" }
# selection = { bg = "212" }
# status = { fg = "yellow" }
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn default_file_parses_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_toml(DEFAULT_TOML)?;
        assert_eq!(config.theme(), &Theme::default());
        assert_eq!(config.general().escape_timeout(), Duration::from_millis(50));
        assert_eq!(config.general().log_level(), "warn");
        Ok(())
    }

    #[test]
    fn values_are_read() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_toml(
            r##"
            [general]
            escape_timeout_ms = 120
            log_level = "debug"
            log_file = "/tmp/dv.log"

            [theme]
            status = { fg = "red" }
            "##,
        )?;
        assert_eq!(config.general().escape_timeout(), Duration::from_millis(120));
        assert_eq!(config.general().log_level(), "debug");
        assert_eq!(config.general().log_file(), Some(Path::new("/tmp/dv.log")));
        assert_eq!(config.theme().status_style().fg, Some(Color::Red));
        Ok(())
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("dirview.toml");
        fs::write(&path, "[general\nescape_timeout_ms = ")?;

        let config = Config::load_from(&path);
        assert_eq!(config.general().escape_timeout(), Duration::from_millis(50));
        Ok(())
    }

    #[test]
    fn missing_file_gives_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.theme(), &Theme::default());
        Ok(())
    }

    #[test]
    fn generate_default_refuses_to_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/dirview.toml");

        Config::generate_default(&path)?;
        assert!(path.exists());
        let second = Config::generate_default(&path);
        assert_eq!(
            second.err().map(|e| e.kind()),
            Some(io::ErrorKind::AlreadyExists)
        );
        Ok(())
    }
}
