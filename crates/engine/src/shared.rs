use crate::engine::Engine;
use crate::error::Result;
use resonance_graph::{ViewState, VisibleView};
use resonance_indexer::{RemovalOutcome, Submission};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Engine handle for concurrent hosts.
///
/// Writers hold the exclusive lock across the registry mutation and the
/// rebuild that follows, so readers only ever observe complete snapshots.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Engine> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Engine> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(&self, raw_text: &str, origin: &str) -> Result<Submission> {
        self.write().submit(raw_text, origin)
    }

    pub fn submit_many<'a>(
        &self,
        texts: impl IntoIterator<Item = &'a str>,
        origin: &str,
    ) -> Result<Vec<Submission>> {
        self.write().submit_many(texts, origin)
    }

    pub fn reject(&self, text: &str) -> Result<RemovalOutcome> {
        self.write().reject(text)
    }

    pub fn query(&self, state: &ViewState) -> VisibleView {
        self.read().query(state)
    }

    pub fn export(&self) -> String {
        self.read().export()
    }
}

impl From<Engine> for SharedEngine {
    fn from(engine: Engine) -> Self {
        Self::new(engine)
    }
}
