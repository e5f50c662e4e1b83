/// Data structures for Soft Dark
use crate::config::ExtensionConfig;
use serde::Deserialize;
use std::fmt::Display;

pub type TabId = i32;

/// The parts of a browser tab the extension cares about
///
/// `url` is absent for tabs the extension has no host permission on, and for
/// tabs that are still pending or have crashed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabInfo {
    pub fn new(id: TabId, url: Option<String>) -> TabInfo {
        TabInfo { id, url }
    }

    /// The URL, if there is a non-empty one
    pub fn usable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Keep every tab that parsed, skipping (and logging) the ones that did not
pub fn collect_tabs<E: Display>(entries: impl IntoIterator<Item = Result<TabInfo, E>>) -> Vec<TabInfo> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(tab) => Some(tab),
            Err(e) => {
                log::debug!("Skipping unreadable tab: {}", e);
                None
            }
        })
        .collect()
}

/// The two bitmap sets the action button can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSet {
    On,
    Off,
}

impl IconSet {
    /// Key of the bitmap set in bridge.js
    pub fn name(self) -> &'static str {
        match self {
            IconSet::On => "on",
            IconSet::Off => "off",
        }
    }
}

/// What the action button should display for a tab
///
/// Always derived from the tab and the stored preference, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    On,
    Off,
    /// No usable URL or hostname: OFF icon with the neutral title
    Neutral,
}

impl UiState {
    pub fn from_enabled(enabled: bool) -> UiState {
        if enabled { UiState::On } else { UiState::Off }
    }

    pub fn icon(self) -> IconSet {
        match self {
            UiState::On => IconSet::On,
            UiState::Off | UiState::Neutral => IconSet::Off,
        }
    }

    pub fn title(self, config: &ExtensionConfig) -> &str {
        match self {
            UiState::On => &config.on_title,
            UiState::Off => &config.off_title,
            UiState::Neutral => &config.neutral_title,
        }
    }
}

/// The `changeInfo` object of a tab update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TabChange {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabChange {
    /// Only finished loads and URL changes can change what the button shows
    pub fn is_relevant(&self) -> bool {
        self.status.as_deref() == Some("complete") || self.url.is_some()
    }
}
