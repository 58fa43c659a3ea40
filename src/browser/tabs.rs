// src/browser/tabs.rs
use crate::linkedin::Page;
use crate::messaging::ContextHandle;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

pub type TabId = u64;

/// An open page and the context its content script runs in.
#[derive(Clone)]
pub struct Tab {
    pub id: TabId,
    pub page: Arc<Page>,
    pub context: ContextHandle,
}

#[derive(Default)]
struct TabState {
    tabs: BTreeMap<TabId, Tab>,
    active: Option<TabId>,
    next_id: TabId,
}

#[derive(Default)]
pub struct TabRegistry {
    state: Mutex<TabState>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, TabState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open a page in a new tab and make it the active one.
    pub fn open(&self, page: Page) -> TabId {
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;

        info!("Opened tab {}: {}", id, page.url);
        let tab = Tab {
            id,
            page: Arc::new(page),
            context: ContextHandle::spawn(format!("tab-{}", id)),
        };
        state.tabs.insert(id, tab);
        state.active = Some(id);
        id
    }

    pub fn activate(&self, id: TabId) -> bool {
        let mut state = self.state();
        if !state.tabs.contains_key(&id) {
            return false;
        }
        state.active = Some(id);
        true
    }

    /// Close a tab. Closing the active tab activates the newest remaining one.
    pub fn close(&self, id: TabId) -> bool {
        let mut state = self.state();
        if state.tabs.remove(&id).is_none() {
            return false;
        }
        if state.active == Some(id) {
            state.active = state.tabs.keys().next_back().copied();
        }
        true
    }

    pub fn active(&self) -> Option<Tab> {
        let state = self.state();
        state.active.and_then(|id| state.tabs.get(&id).cloned())
    }

    pub fn get(&self, id: TabId) -> Option<Tab> {
        self.state().tabs.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state().tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
