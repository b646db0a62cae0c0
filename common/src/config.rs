//! Application configuration
//!
//! The frontend embeds a JSON document at build time and parses it with
//! [`AppConfig::from_json`]. Every field is optional in that document; the
//! defaults reproduce the deployed clinic setup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("doctor roster must contain at least one entry")]
    EmptyRoster,

    #[error("storage key `{0}` must not be empty")]
    BlankStorageKey(&'static str),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Full clinic name printed under the logo
    pub clinic_name: String,
    /// Doctors selectable for a prescription, in display order
    pub doctors: Vec<String>,
    /// Editor content for a fresh draft
    pub default_content: String,
    pub storage_keys: StorageKeys,
    pub toolbar: ToolbarConfig,
    /// Suggested file name for the template export
    pub export_file_name: String,
    /// Max level for console logging (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

/// Keys under which the three persisted collections live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub templates: String,
    pub signatures: String,
    pub logo: String,
}

/// Formatting operations offered by the rich-text editor toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    /// Heading levels offered by the header picker; empty hides it.
    pub header_levels: Vec<u8>,
    pub formats: Vec<Format>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Strike,
    OrderedList,
    BulletList,
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
    Link,
    Image,
    Clean,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clinic_name: "თბილისის სახელმწიფო სამედიცინო უნივერსიტეტი და ინგოროყვას მაღალი სამედიცინო ტექნოლოგიების საუნივერსიტეტო კლინიკა".to_string(),
            doctors: [
                "ნინო კიკვაძე",
                "ანა დალაქიშვილი",
                "ეკლა მაისურაძე",
                "ურად მიგინეიშვილი",
                "კეთევან ზედელაშვილი",
                "ტერეზა ოსადჩუკე",
                "ეკატერინე მიქელაძე",
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
            default_content: "<p><strong>დანიშნულება:</strong></p><p></p>".to_string(),
            storage_keys: StorageKeys::default(),
            toolbar: ToolbarConfig::default(),
            export_file_name: "mpg_templates.json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            templates: "mpg_templates_v1".to_string(),
            signatures: "mpg_signatures_v1".to_string(),
            logo: "mpg_logo_v1".to_string(),
        }
    }
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            header_levels: vec![1, 2, 3],
            formats: vec![
                Format::Bold,
                Format::Italic,
                Format::Underline,
                Format::Strike,
                Format::OrderedList,
                Format::BulletList,
                Format::AlignLeft,
                Format::AlignCenter,
                Format::AlignRight,
                Format::AlignJustify,
                Format::Link,
                Format::Image,
                Format::Clean,
            ],
        }
    }
}

impl ToolbarConfig {
    pub fn enables(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }
}

impl AppConfig {
    /// Parse and validate a configuration document.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.doctors.iter().all(|d| d.trim().is_empty()) {
            return Err(ConfigError::EmptyRoster);
        }
        let keys = &self.storage_keys;
        for (field, key) in [
            ("templates", &keys.templates),
            ("signatures", &keys.signatures),
            ("logo", &keys.logo),
        ] {
            if key.trim().is_empty() {
                return Err(ConfigError::BlankStorageKey(field));
            }
        }
        Ok(())
    }

    /// First selectable doctor; a fresh draft starts with this one.
    pub fn default_doctor(&self) -> &str {
        self.doctors
            .iter()
            .find(|d| !d.trim().is_empty())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
