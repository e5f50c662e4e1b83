/// Toggle action: flips the stored preference for the clicked tab's hostname

use crate::error::{ExtensionError, Result};
use crate::hostname::hostname_from_url;
use crate::storage::PreferenceStore;
use crate::sync::{IconPresenter, Synchronizer, TabHost};
use crate::tab_data::{TabId, TabInfo};
use std::rc::Rc;

/// Runs the page-side effect step in a tab
///
/// The injected step reads the stored preference itself, so it must only be
/// triggered after the write has completed. Fire-and-forget.
pub trait EffectInjector {
    fn inject(&self, tab_id: TabId);
}

pub struct ToggleHandler<T, S, P, E> {
    sync: Rc<Synchronizer<T, S, P>>,
    injector: E,
}

impl<T, S, P, E> ToggleHandler<T, S, P, E>
where
    T: TabHost,
    S: PreferenceStore,
    P: IconPresenter,
    E: EffectInjector,
{
    pub fn new(sync: Rc<Synchronizer<T, S, P>>, injector: E) -> Self {
        ToggleHandler { sync, injector }
    }

    /// Handle a click on the action button
    ///
    /// Returns the newly stored state. Privileged pages and URLs without a
    /// hostname leave the store and the button untouched.
    pub async fn on_user_activate(&self, tab: &TabInfo) -> Result<bool> {
        let url = tab.usable_url().unwrap_or_default();

        if self.sync.config().is_privileged(url) {
            log::debug!("Ignoring toggle on privileged page: {}", url);
            return Err(ExtensionError::PrivilegedScheme(url.to_string()));
        }

        let Some(hostname) = hostname_from_url(url) else {
            log::error!("Failed to process URL: {:?}", tab.url);
            return Err(ExtensionError::UrlUnparsable(url.to_string()));
        };

        let store = self.sync.store();
        let new_state = !store.get(&hostname).await?;
        store.set(&hostname, new_state).await?;
        log::info!("Dark mode for {} is now {}", hostname, if new_state { "on" } else { "off" });

        self.injector.inject(tab.id);
        self.sync.refresh(tab.id, Some(new_state)).await;

        Ok(new_state)
    }
}
