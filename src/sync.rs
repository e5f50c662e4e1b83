/// Tab state synchronizer: keeps the action button in line with stored preferences

use crate::config::ExtensionConfig;
use crate::error::Result;
use crate::hostname::hostname_from_url;
use crate::storage::PreferenceStore;
use crate::tab_data::{IconSet, TabId, TabInfo, UiState};
use std::rc::Rc;

/// Read access to the browser's tabs
#[allow(async_fn_in_trait)]
pub trait TabHost {
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo>;

    async fn query_tabs(&self) -> Result<Vec<TabInfo>>;
}

/// Sets the action button's icon and tooltip for a tab
///
/// Fire-and-forget: implementations log their own failures (the tab may be
/// gone by the time the call lands).
pub trait IconPresenter {
    fn set_icon(&self, tab_id: TabId, icon: IconSet);

    fn set_title(&self, tab_id: TabId, title: &str);
}

pub struct Synchronizer<T, S, P> {
    tabs: T,
    store: Rc<S>,
    presenter: P,
    config: Rc<ExtensionConfig>,
}

impl<T, S, P> Synchronizer<T, S, P>
where
    T: TabHost,
    S: PreferenceStore,
    P: IconPresenter,
{
    pub fn new(tabs: T, store: Rc<S>, presenter: P, config: Rc<ExtensionConfig>) -> Self {
        Synchronizer {
            tabs,
            store,
            presenter,
            config,
        }
    }

    pub fn store(&self) -> &Rc<S> {
        &self.store
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn presenter_for_tests(&self) -> &P {
        &self.presenter
    }

    /// Re-derive and apply the UI state for one tab
    ///
    /// With `explicit_state` the store is not read at all: right after a
    /// toggle the caller already knows the value it just wrote.
    pub async fn refresh(&self, tab_id: TabId, explicit_state: Option<bool>) -> UiState {
        let state = self.resolve(tab_id, explicit_state).await;
        self.apply(tab_id, state);
        state
    }

    /// Refresh every open tab, one after another
    pub async fn refresh_all(&self) {
        let tabs = match self.tabs.query_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                log::warn!("Could not list tabs for refresh: {}", e);
                return;
            }
        };

        log::debug!("Refreshing {} tabs", tabs.len());
        for tab in tabs {
            self.refresh(tab.id, None).await;
        }
    }

    async fn resolve(&self, tab_id: TabId, explicit_state: Option<bool>) -> UiState {
        let tab = match self.tabs.get_tab(tab_id).await {
            Ok(tab) => tab,
            Err(e) => {
                log::debug!("Tab {} lookup failed, showing neutral state: {}", tab_id, e);
                return UiState::Neutral;
            }
        };

        let Some(hostname) = tab.usable_url().and_then(hostname_from_url) else {
            return UiState::Neutral;
        };

        if let Some(enabled) = explicit_state {
            return UiState::from_enabled(enabled);
        }

        match self.store.get(&hostname).await {
            Ok(enabled) => UiState::from_enabled(enabled),
            Err(e) => {
                log::warn!("Could not read preference for {}: {}", hostname, e);
                UiState::Neutral
            }
        }
    }

    fn apply(&self, tab_id: TabId, state: UiState) {
        self.presenter.set_icon(tab_id, state.icon());
        self.presenter.set_title(tab_id, state.title(&self.config));
    }
}
