/// Error types for Soft Dark
use thiserror::Error;

/// Everything that can go wrong between a browser event and the UI update.
///
/// None of these are fatal: the synchronizer degrades to the neutral OFF
/// state and the toggle handler aborts without touching stored state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtensionError {
    #[error("tab {0} is unavailable")]
    TabUnavailable(i32),
    #[error("cannot resolve a hostname from URL: {0}")]
    UrlUnparsable(String),
    #[error("refusing to toggle privileged URL: {0}")]
    PrivilegedScheme(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("browser bridge error: {0}")]
    Bridge(String),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExtensionError>;

impl From<ExtensionError> for wasm_bindgen::JsValue {
    fn from(e: ExtensionError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
