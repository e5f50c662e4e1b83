/// Soft Dark - Chrome Extension for per-site dark mode
/// Built with Rust + WASM

mod chrome;
pub mod config;
pub mod effect;
pub mod error;
pub mod events;
pub mod hostname;
pub mod storage;
pub mod sync;
pub mod tab_data;
pub mod toggle;

#[cfg(test)]
mod testing;

use config::ExtensionConfig;
use error::ExtensionError;
use events::LifecycleEvent;
use tab_data::{TabChange, TabInfo};
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export hostname parsing for JavaScript access
#[wasm_bindgen]
pub fn hostname_of(url: &str) -> Option<String> {
    hostname::hostname_from_url(url)
}

/// Entry point of the background service worker
///
/// `config` is an optional plain object; unknown or missing fields take
/// their defaults. Listeners are attached by background.js itself, which
/// forwards each event to the `on_*` exports below.
#[wasm_bindgen]
pub fn start_background(config: JsValue) {
    let config = if config.is_undefined() || config.is_null() {
        ExtensionConfig::default()
    } else {
        ExtensionConfig::or_default(
            serde_wasm_bindgen::from_value(config).map_err(|e| ExtensionError::Config(e.to_string())),
        )
    };

    log::set_max_level(config.level_filter());
    chrome::install_dispatcher(config);
    log::info!("Soft Dark background ready");
}

#[wasm_bindgen]
pub async fn on_tab_activated(tab_id: i32) {
    chrome::dispatch(LifecycleEvent::TabActivated { tab_id }).await;
}

#[wasm_bindgen]
pub async fn on_tab_updated(tab_id: i32, change: JsValue) {
    let change = serde_wasm_bindgen::from_value::<TabChange>(change);
    chrome::dispatch(LifecycleEvent::tab_updated(tab_id, change)).await;
}

#[wasm_bindgen]
pub async fn on_browser_startup() {
    chrome::dispatch(LifecycleEvent::BrowserStartup).await;
}

#[wasm_bindgen]
pub async fn on_extension_installed() {
    chrome::dispatch(LifecycleEvent::ExtensionInstalled).await;
}

#[wasm_bindgen]
pub async fn on_action_clicked(tab: JsValue) {
    match serde_wasm_bindgen::from_value::<TabInfo>(tab) {
        Ok(tab) => chrome::dispatch(LifecycleEvent::ActionClicked { tab }).await,
        Err(e) => log::error!("Failed to parse clicked tab: {:?}", e),
    }
}

/// Entry point of the content script: make the page match the stored preference
#[wasm_bindgen]
pub async fn apply_stored_effect() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let hostname = window.location().hostname()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    effect::apply_for_hostname(&chrome::ChromeStore, &document, &hostname).await?;
    Ok(())
}
