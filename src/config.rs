use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::{style::TemplateStyle, ColorDepth};

/// User configuration for tailor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Template picked when none is given on the command line
    pub template: TemplateStyle,
    /// Color depth for ANSI output
    pub color_depth: ColorDepth,
    /// Paint template colors in the interactive preview
    pub color: bool,
    /// Where exported documents are written
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            template: TemplateStyle::Ats,
            color_depth: ColorDepth::Auto,
            color: true,
            output_dir: None,
        }
    }
}

impl Config {
    /// Load config from the config directory
    pub fn load() -> Result<Self> {
        match Self::get_config_path() {
            Some(config_path) => Self::load_from(&config_path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from an explicit path, falling back to defaults if it is missing
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }

        // Return default config if no file found
        Ok(Config::default())
    }

    /// Save config to the config directory
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::get_config_path() {
            self.save_to(&config_path)?;
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tailor").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<()> {
        let config = Config::default();
        config.save()?;
        Ok(())
    }

    /// Persist a template choice made in the interactive selector
    pub fn remember_template(&mut self, template: TemplateStyle) {
        self.template = template;
        if let Err(err) = self.save() {
            tracing::warn!(%err, "could not save template choice");
        }
    }

    /// Directory for exports: configured, else the current directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            template: TemplateStyle::Engineering,
            color_depth: ColorDepth::Extended,
            color: false,
            output_dir: Some(PathBuf::from("/tmp/resumes")),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "template = \"modern\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.template, TemplateStyle::Modern);
        assert!(config.color);
    }
}
