/// Browser bridge: chrome.* APIs reached through bridge.js

use crate::config::ExtensionConfig;
use crate::error::{ExtensionError, Result};
use crate::events::{Dispatcher, LifecycleEvent};
use crate::storage::PreferenceStore;
use crate::sync::{IconPresenter, Synchronizer, TabHost};
use crate::tab_data::{IconSet, TabId, TabInfo, collect_tabs};
use crate::toggle::EffectInjector;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs() -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getPreference(hostname: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setPreference(hostname: &str, enabled: bool) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setActionIcon(tab_id: i32, icon: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setActionTitle(tab_id: i32, title: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn injectEffect(tab_id: i32) -> std::result::Result<(), JsValue>;
}

fn bridge_error(e: JsValue) -> ExtensionError {
    ExtensionError::Bridge(format!("{:?}", e))
}

pub struct ChromeTabs;

impl TabHost for ChromeTabs {
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo> {
        let tab_js = getTab(tab_id)
            .await
            .map_err(|_| ExtensionError::TabUnavailable(tab_id))?;
        if tab_js.is_null() || tab_js.is_undefined() {
            return Err(ExtensionError::TabUnavailable(tab_id));
        }
        serde_wasm_bindgen::from_value(tab_js).map_err(|e| ExtensionError::Bridge(format!("Failed to parse tab: {:?}", e)))
    }

    async fn query_tabs(&self) -> Result<Vec<TabInfo>> {
        let tabs_js = queryTabs().await.map_err(bridge_error)?;
        let entries: js_sys::Array = tabs_js
            .dyn_into()
            .map_err(|v| ExtensionError::Bridge(format!("tabs.query returned {:?}", v)))?;
        Ok(collect_tabs(entries.iter().map(serde_wasm_bindgen::from_value::<TabInfo>)))
    }
}

/// chrome.storage.local, one key per hostname
pub struct ChromeStore;

impl PreferenceStore for ChromeStore {
    async fn get(&self, hostname: &str) -> Result<bool> {
        let value = getPreference(hostname)
            .await
            .map_err(|e| ExtensionError::Storage(format!("{:?}", e)))?;
        Ok(value.is_truthy())
    }

    async fn set(&self, hostname: &str, enabled: bool) -> Result<()> {
        setPreference(hostname, enabled)
            .await
            .map_err(|e| ExtensionError::Storage(format!("{:?}", e)))
    }
}

pub struct ChromePresenter;

impl IconPresenter for ChromePresenter {
    fn set_icon(&self, tab_id: TabId, icon: IconSet) {
        let icon = icon.name();
        spawn_local(async move {
            if let Err(e) = setActionIcon(tab_id, icon).await {
                log::debug!("setIcon on tab {} failed: {:?}", tab_id, e);
            }
        });
    }

    fn set_title(&self, tab_id: TabId, title: &str) {
        let title = title.to_string();
        spawn_local(async move {
            if let Err(e) = setActionTitle(tab_id, &title).await {
                log::debug!("setTitle on tab {} failed: {:?}", tab_id, e);
            }
        });
    }
}

pub struct ChromeInjector;

impl EffectInjector for ChromeInjector {
    fn inject(&self, tab_id: TabId) {
        spawn_local(async move {
            if let Err(e) = injectEffect(tab_id).await {
                log::warn!("Could not inject effect into tab {}: {:?}", tab_id, e);
            }
        });
    }
}

pub type ChromeDispatcher = Dispatcher<ChromeTabs, ChromeStore, ChromePresenter, ChromeInjector>;

thread_local! {
    static DISPATCHER: RefCell<Option<Rc<ChromeDispatcher>>> = const { RefCell::new(None) };
}

fn build_dispatcher(config: ExtensionConfig) -> ChromeDispatcher {
    let sync = Synchronizer::new(ChromeTabs, Rc::new(ChromeStore), ChromePresenter, Rc::new(config));
    Dispatcher::new(sync, ChromeInjector)
}

/// Replace the service worker's dispatcher with one built from `config`
pub fn install_dispatcher(config: ExtensionConfig) -> Rc<ChromeDispatcher> {
    let dispatcher = Rc::new(build_dispatcher(config));
    DISPATCHER.with(|slot| *slot.borrow_mut() = Some(dispatcher.clone()));
    dispatcher
}

/// The installed dispatcher, or a default one if `start_background` has not
/// run yet. Listeners are attached by background.js before the module is
/// ready, so an event can arrive first.
pub fn current_dispatcher() -> Rc<ChromeDispatcher> {
    DISPATCHER.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| Rc::new(build_dispatcher(ExtensionConfig::default())))
            .clone()
    })
}

pub async fn dispatch(event: LifecycleEvent) {
    let dispatcher = current_dispatcher();
    dispatcher.dispatch(event).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_available_before_start() {
        let dispatcher = current_dispatcher();
        assert_eq!(dispatcher.synchronizer().config(), &ExtensionConfig::default());
        assert!(Rc::ptr_eq(&dispatcher, &current_dispatcher()));
    }

    #[test]
    fn test_install_replaces_dispatcher() {
        let config = ExtensionConfig {
            on_title: "Night".to_string(),
            ..ExtensionConfig::default()
        };

        let installed = install_dispatcher(config);

        assert!(Rc::ptr_eq(&installed, &current_dispatcher()));
        assert_eq!(current_dispatcher().synchronizer().config().on_title, "Night");
    }
}
