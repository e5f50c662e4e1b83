/// Extension settings, deserialized from the object handed to `start_background`
use crate::error::{ExtensionError, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::str::FromStr;

pub const NEUTRAL_TITLE: &str = "Toggle Dark Mode";
pub const ON_TITLE: &str = "Dark mode: ON";
pub const OFF_TITLE: &str = "Dark mode: OFF";

const PRIVILEGED_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "chrome-search",
    "chrome-untrusted",
    "devtools",
    "edge",
    "about",
    "view-source",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionConfig {
    pub neutral_title: String,
    pub on_title: String,
    pub off_title: String,
    /// URL schemes (without the trailing ':') the toggle refuses to act on
    pub privileged_schemes: Vec<String>,
    pub log_level: String,
}

impl ExtensionConfig {
    pub fn from_json(json: &str) -> Result<ExtensionConfig> {
        serde_json::from_str(json).map_err(|e| ExtensionError::Config(e.to_string()))
    }

    /// The parsed config, or the defaults (logged) when parsing failed
    pub fn or_default(parsed: Result<ExtensionConfig>) -> ExtensionConfig {
        parsed.unwrap_or_else(|e| {
            log::error!("Invalid config, using defaults: {}", e);
            ExtensionConfig::default()
        })
    }

    /// Falls back to `Info` when the configured level is not recognized.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn is_privileged(&self, url: &str) -> bool {
        let url = url.trim_start().to_ascii_lowercase();
        let Some((scheme, _)) = url.split_once(':') else {
            return false;
        };
        self.privileged_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig {
            neutral_title: NEUTRAL_TITLE.to_string(),
            on_title: ON_TITLE.to_string(),
            off_title: OFF_TITLE.to_string(),
            privileged_schemes: PRIVILEGED_SCHEMES.iter().map(|s| s.to_string()).collect(),
            log_level: "info".to_string(),
        }
    }
}
