//! Authentication source registry.
//!
//! Populated once at startup from an explicit list of sources, then shared
//! read-only across request handlers. Duplicate names are an error rather
//! than a silent replace, and registration order is preserved so UI listings
//! are deterministic.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::AuthSource;

/// Errors raised while building or querying the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A source with this name is already registered.
    #[error("authentication source '{name}' is already registered")]
    Duplicate {
        /// Conflicting source name.
        name: String,
    },
    /// No source with this name is registered.
    #[error("authentication source '{name}' is not configured")]
    NotConfigured {
        /// Requested source name.
        name: String,
    },
}

/// Mapping from source name to source implementation.
#[derive(Default)]
pub struct AuthSourceRegistry {
    sources: HashMap<&'static str, Arc<dyn AuthSource>>,
    order: Vec<&'static str>,
}

impl AuthSourceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an explicit source list, failing on the first
    /// duplicate name.
    pub fn with_sources(
        sources: impl IntoIterator<Item = Arc<dyn AuthSource>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for source in sources {
            registry.register(source)?;
        }
        Ok(registry)
    }

    /// Register a source under its own name.
    pub fn register(&mut self, source: Arc<dyn AuthSource>) -> Result<(), RegistryError> {
        let name = source.source_name();
        if self.sources.contains_key(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_owned(),
            });
        }
        self.order.push(name);
        self.sources.insert(name, source);
        Ok(())
    }

    /// Look up a source by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn AuthSource>, RegistryError> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotConfigured {
                name: name.to_owned(),
            })
    }

    /// Registered sources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AuthSource>> {
        self.order.iter().filter_map(|name| self.sources.get(name))
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no source is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
