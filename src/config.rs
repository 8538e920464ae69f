//! Settings file and command-line overrides.

use crate::reconcile::LabelAliases;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_COSTS_FILE: &str = "costs_2022.csv";
pub const DEFAULT_REVENUE_FILE: &str = "revenue_2022.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Dashboard settings, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_costs_path")]
    pub costs_path: PathBuf,
    #[serde(default = "default_revenue_path")]
    pub revenue_path: PathBuf,
    /// Substitutions applied to revenue labels before reconciliation.
    #[serde(default)]
    pub aliases: LabelAliases,
    #[serde(default)]
    pub selected: Vec<String>,
    #[serde(default = "default_export_width")]
    pub export_width: u32,
    #[serde(default = "default_export_height")]
    pub export_height: u32,
}

fn default_costs_path() -> PathBuf {
    PathBuf::from(DEFAULT_COSTS_FILE)
}

fn default_revenue_path() -> PathBuf {
    PathBuf::from(DEFAULT_REVENUE_FILE)
}

fn default_export_width() -> u32 {
    1200
}

fn default_export_height() -> u32 {
    700
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            costs_path: default_costs_path(),
            revenue_path: default_revenue_path(),
            aliases: LabelAliases::default(),
            selected: Vec::new(),
            export_width: default_export_width(),
            export_height: default_export_height(),
        }
    }
}

/// Values given on the command line; `None`/empty means "keep the file value".
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub costs_path: Option<PathBuf>,
    pub revenue_path: Option<PathBuf>,
    pub selected: Vec<String>,
}

impl Settings {
    /// Load settings from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) {
        if let Some(path) = overrides.costs_path {
            self.costs_path = path;
        }
        if let Some(path) = overrides.revenue_path {
            self.revenue_path = path;
        }
        if !overrides.selected.is_empty() {
            self.selected = overrides.selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.costs_path, PathBuf::from("costs_2022.csv"));
        assert_eq!(settings.aliases, LabelAliases::default());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"aliases": [["Online Revenue", "Online"]], "export_width": 640}}"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(
            settings.aliases,
            LabelAliases(vec![("Online Revenue".to_string(), "Online".to_string())])
        );
        assert_eq!(settings.export_width, 640);
        assert_eq!(settings.export_height, 700);
        assert_eq!(settings.revenue_path, PathBuf::from("revenue_2022.csv"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn cli_overrides_win() {
        let mut settings = Settings {
            selected: vec!["Ads".to_string()],
            ..Settings::default()
        };
        settings.apply_overrides(SettingsOverrides {
            costs_path: Some(PathBuf::from("c.csv")),
            revenue_path: None,
            selected: vec![],
        });
        assert_eq!(settings.costs_path, PathBuf::from("c.csv"));
        assert_eq!(settings.revenue_path, PathBuf::from("revenue_2022.csv"));
        assert_eq!(settings.selected, vec!["Ads"]);

        settings.apply_overrides(SettingsOverrides {
            selected: vec!["Hosting".to_string()],
            ..SettingsOverrides::default()
        });
        assert_eq!(settings.selected, vec!["Hosting"]);
    }
}
