/// In-memory fakes for the browser collaborators, shared by the unit tests
use crate::error::{ExtensionError, Result};
use crate::storage::{MemoryStore, PreferenceStore};
use crate::sync::{IconPresenter, TabHost};
use crate::tab_data::{IconSet, TabId, TabInfo};
use crate::toggle::EffectInjector;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
pub struct FakeTabs {
    tabs: BTreeMap<TabId, TabInfo>,
}

impl FakeTabs {
    pub fn with_tab(id: TabId, url: &str) -> Self {
        let mut tabs = FakeTabs::default();
        tabs.insert(TabInfo::new(id, Some(url.to_string())));
        tabs
    }

    pub fn insert(&mut self, tab: TabInfo) {
        self.tabs.insert(tab.id, tab);
    }
}

impl TabHost for FakeTabs {
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo> {
        self.tabs
            .get(&tab_id)
            .cloned()
            .ok_or(ExtensionError::TabUnavailable(tab_id))
    }

    async fn query_tabs(&self) -> Result<Vec<TabInfo>> {
        Ok(self.tabs.values().cloned().collect())
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    icons: RefCell<Vec<(TabId, IconSet)>>,
    titles: RefCell<Vec<(TabId, String)>>,
}

impl RecordingPresenter {
    /// Every (icon, title) pair applied to a tab, oldest first
    pub fn calls_for(&self, tab_id: TabId) -> Vec<(IconSet, String)> {
        let icons = self.icons.borrow();
        let titles = self.titles.borrow();
        icons
            .iter()
            .filter(|(id, _)| *id == tab_id)
            .zip(titles.iter().filter(|(id, _)| *id == tab_id))
            .map(|((_, icon), (_, title))| (*icon, title.clone()))
            .collect()
    }

    pub fn last(&self, tab_id: TabId) -> Option<(IconSet, String)> {
        self.calls_for(tab_id).pop()
    }

    pub fn call_count(&self) -> usize {
        self.icons.borrow().len()
    }
}

impl IconPresenter for RecordingPresenter {
    fn set_icon(&self, tab_id: TabId, icon: IconSet) {
        self.icons.borrow_mut().push((tab_id, icon));
    }

    fn set_title(&self, tab_id: TabId, title: &str) {
        self.titles.borrow_mut().push((tab_id, title.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingInjector {
    pub injected: RefCell<Vec<TabId>>,
}

impl EffectInjector for RecordingInjector {
    fn inject(&self, tab_id: TabId) {
        self.injected.borrow_mut().push(tab_id);
    }
}

/// Every operation fails, as if the storage backend went away
pub struct FailingStore;

impl PreferenceStore for FailingStore {
    async fn get(&self, _hostname: &str) -> Result<bool> {
        Err(ExtensionError::Storage("backend unavailable".to_string()))
    }

    async fn set(&self, _hostname: &str, _enabled: bool) -> Result<()> {
        Err(ExtensionError::Storage("backend unavailable".to_string()))
    }
}

/// A store whose reads lag one write behind
///
/// `get` answers with the value a key had before its most recent `set`,
/// the way a slow read issued before a write would. Reads are counted.
#[derive(Default)]
pub struct LaggingStore {
    current: MemoryStore,
    previous: RefCell<HashMap<String, bool>>,
    pub reads: Cell<usize>,
}

impl LaggingStore {
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        let current = MemoryStore::with_entries(entries);
        let previous = RefCell::new(current.snapshot());
        LaggingStore {
            current,
            previous,
            reads: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> HashMap<String, bool> {
        self.current.snapshot()
    }
}

impl PreferenceStore for LaggingStore {
    async fn get(&self, hostname: &str) -> Result<bool> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.previous.borrow().get(hostname).copied().unwrap_or(false))
    }

    async fn set(&self, hostname: &str, enabled: bool) -> Result<()> {
        let before = self.current.get(hostname).await?;
        self.previous.borrow_mut().insert(hostname.to_string(), before);
        self.current.set(hostname, enabled).await
    }
}
