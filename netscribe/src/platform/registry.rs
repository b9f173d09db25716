//! Global platform registry for looking up platform definitions.

use std::sync::RwLock;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::definition::PlatformDefinition;
use super::vendors;
use crate::error::{PlatformError, Result};

/// Global platform registry.
static REGISTRY: Lazy<RwLock<PlatformRegistry>> = Lazy::new(|| {
    let mut registry = PlatformRegistry::new();
    registry.register_builtin_platforms();
    RwLock::new(registry)
});

/// Registry for platform definitions.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    platforms: IndexMap<String, PlatformDefinition>,
}

impl PlatformRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            platforms: IndexMap::new(),
        }
    }

    /// Get the global registry.
    pub fn global() -> &'static RwLock<PlatformRegistry> {
        &REGISTRY
    }

    /// Register built-in platforms.
    fn register_builtin_platforms(&mut self) {
        self.platforms
            .insert(vendors::cisco_ios::NAME.to_string(), vendors::cisco_ios::platform());
        self.platforms.insert(
            vendors::cisco_nxos::NAME.to_string(),
            vendors::cisco_nxos::platform(),
        );
        self.platforms
            .insert(vendors::cisco_asa::NAME.to_string(), vendors::cisco_asa::platform());
    }

    /// Register a platform definition.
    pub fn register(&mut self, platform: PlatformDefinition) -> Result<()> {
        if self.platforms.contains_key(&platform.name) {
            return Err(PlatformError::AlreadyRegistered {
                name: platform.name.clone(),
            }
            .into());
        }
        self.platforms.insert(platform.name.clone(), platform);
        Ok(())
    }

    /// Get a platform by name.
    pub fn get(&self, name: &str) -> Option<&PlatformDefinition> {
        self.platforms.get(name)
    }

    /// Check if a platform is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.platforms.contains_key(name)
    }

    /// List all registered platform names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.platforms.keys()
    }
}
