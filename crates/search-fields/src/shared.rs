#![deny(unsafe_code)]

use std::sync::{Arc, PoisonError, RwLock};

use crate::registry::FieldTypeRegistry;

/// Publishes the current [`FieldTypeRegistry`] to concurrent readers.
///
/// Readers take an `Arc` snapshot and keep using it for the whole request.
/// A refresh swaps the pointer; snapshots already handed out are untouched.
/// The lock only guards the pointer, never a lookup.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    current: Arc<RwLock<Arc<FieldTypeRegistry>>>,
}

impl SharedRegistry {
    pub fn new(registry: FieldTypeRegistry) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    pub fn snapshot(&self) -> Arc<FieldTypeRegistry> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publish `registry` and return the one it replaced.
    pub fn replace(&self, registry: FieldTypeRegistry) -> Arc<FieldTypeRegistry> {
        let next = Arc::new(registry);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        tracing::info!(
            previous_fields = previous.len(),
            fields = guard.len(),
            "Replaced field registry"
        );
        previous
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(FieldTypeRegistry::empty())
    }
}

impl From<FieldTypeRegistry> for SharedRegistry {
    fn from(registry: FieldTypeRegistry) -> Self {
        Self::new(registry)
    }
}
