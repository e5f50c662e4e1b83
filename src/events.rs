/// Browser lifecycle events and their dispatch

use crate::error::ExtensionError;
use crate::storage::PreferenceStore;
use crate::sync::{IconPresenter, Synchronizer, TabHost};
use crate::tab_data::{TabChange, TabId, TabInfo};
use crate::toggle::{EffectInjector, ToggleHandler};
use std::fmt::Display;
use std::rc::Rc;

/// Every browser event the extension listens to
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    TabActivated { tab_id: TabId },
    TabUpdated { tab_id: TabId, change: TabChange },
    BrowserStartup,
    ExtensionInstalled,
    ActionClicked { tab: TabInfo },
}

impl LifecycleEvent {
    /// Build a tab update from the browser's `changeInfo`
    ///
    /// Change info that cannot be read still refreshes the tab: a redundant
    /// refresh is harmless, a skipped one leaves the button stale.
    pub fn tab_updated<E: Display>(tab_id: TabId, change: std::result::Result<TabChange, E>) -> LifecycleEvent {
        let change = change.unwrap_or_else(|e| {
            log::debug!("Unreadable change info for tab {}: {}", tab_id, e);
            TabChange {
                status: Some("complete".to_string()),
                url: None,
            }
        });
        LifecycleEvent::TabUpdated { tab_id, change }
    }
}

/// Routes lifecycle events to the synchronizer or the toggle handler
///
/// This is where errors stop: nothing is returned to the browser host.
pub struct Dispatcher<T, S, P, E> {
    sync: Rc<Synchronizer<T, S, P>>,
    toggle: ToggleHandler<T, S, P, E>,
}

impl<T, S, P, E> Dispatcher<T, S, P, E>
where
    T: TabHost,
    S: PreferenceStore,
    P: IconPresenter,
    E: EffectInjector,
{
    pub fn new(sync: Synchronizer<T, S, P>, injector: E) -> Self {
        let sync = Rc::new(sync);
        let toggle = ToggleHandler::new(sync.clone(), injector);
        Dispatcher { sync, toggle }
    }

    pub fn synchronizer(&self) -> &Synchronizer<T, S, P> {
        &self.sync
    }

    pub async fn dispatch(&self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::TabActivated { tab_id } => {
                self.sync.refresh(tab_id, None).await;
            }
            LifecycleEvent::TabUpdated { tab_id, change } => {
                if change.is_relevant() {
                    self.sync.refresh(tab_id, None).await;
                }
            }
            LifecycleEvent::BrowserStartup | LifecycleEvent::ExtensionInstalled => {
                self.sync.refresh_all().await;
            }
            LifecycleEvent::ActionClicked { tab } => match self.toggle.on_user_activate(&tab).await {
                Ok(_) | Err(ExtensionError::PrivilegedScheme(_)) | Err(ExtensionError::UrlUnparsable(_)) => {}
                Err(e) => log::error!("Toggle failed for tab {}: {}", tab.id, e),
            },
        }
    }
}
