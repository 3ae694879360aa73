//! Lock-guarded handles for state shared between the controller and views.
//!
//! Access is closure-scoped so a guard can never be held across an `.await`.

use std::sync::{Arc, RwLock};

use crate::error::CacheError;
use crate::layers::CacheStore;
use crate::selection::SelectionTracker;

#[derive(Debug, Default)]
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Shared<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Run `f` with shared access.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, CacheError> {
        let guard = self.0.read().map_err(|_| CacheError::Poisoned)?;
        Ok(f(&guard))
    }

    /// Run `f` with exclusive access; no reader observes an intermediate state.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, CacheError> {
        let mut guard = self.0.write().map_err(|_| CacheError::Poisoned)?;
        Ok(f(&mut guard))
    }
}

pub type SharedCache = Shared<CacheStore>;
pub type SharedSelection = Shared<SelectionTracker>;
