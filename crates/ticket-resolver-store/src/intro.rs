//! Flag recording that the intro screen has been dismissed.

use crate::INTRO_SEEN_KEY;
use crate::error::StoreError;
use crate::kv::SharedStore;
use log::debug;

#[derive(Clone)]
pub struct IntroFlag {
    store: SharedStore,
}

impl IntroFlag {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Any stored value counts as seen.
    pub fn seen(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(INTRO_SEEN_KEY)?.is_some())
    }

    pub fn mark_seen(&self) -> Result<(), StoreError> {
        debug!("marking intro as seen");
        self.store.set(INTRO_SEEN_KEY, "true")
    }

    /// Forget the flag so the intro shows again.
    pub fn reset(&self) -> Result<bool, StoreError> {
        self.store.remove(INTRO_SEEN_KEY)
    }
}
