//! Hierarchy registry
//!
//! An application usually knows several texts (translations, editions) and picks one as the
//! default. The registry holds them by key and is passed explicitly to whatever needs it; there
//! is no global instance.

use crate::builder::LocatorBuilder;
use crate::error::RegistryError;
use crate::hierarchy::HierarchyProvider;
use crate::metadata::Metadata;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Registry {
    providers: BTreeMap<String, Arc<dyn HierarchyProvider>>,
    selected: Option<String>,
    settings: Metadata,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider under `key`, replacing any previous one. The first provider registered
    /// becomes the selected one.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        provider: Arc<dyn HierarchyProvider>,
    ) -> &mut Self {
        let key = key.into();
        tracing::debug!(key, "registering hierarchy");
        if self.selected.is_none() {
            self.selected = Some(key.clone());
        }
        self.providers.insert(key, provider);
        self
    }

    pub fn select(&mut self, key: &str) -> Result<&mut Self, RegistryError> {
        if !self.providers.contains_key(key) {
            return Err(RegistryError::UnknownKey(key.to_string()));
        }
        self.selected = Some(key.to_string());
        Ok(self)
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Result<Arc<dyn HierarchyProvider>, RegistryError> {
        let key = self.selected.as_deref().ok_or(RegistryError::NothingSelected)?;
        self.get(key)
    }

    pub fn get(&self, key: &str) -> Result<Arc<dyn HierarchyProvider>, RegistryError> {
        self.providers
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownKey(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Parse `text` against the selected hierarchy.
    pub fn lookup(&self, text: &str) -> Result<LocatorBuilder, RegistryError> {
        let provider = self.selected()?;
        let mut builder = LocatorBuilder::with_hierarchy(provider);
        builder.parse(text);
        Ok(builder)
    }

    /// Application-level settings, e.g. the user's preferred translation.
    pub fn settings(&self) -> &Metadata {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Metadata {
        &mut self.settings
    }
}
