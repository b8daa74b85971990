//! Boutique store
//!
//! The whole catalog lives in a single plugin-data slot of the host document.
//! An empty slot means "nothing saved yet" and loads as an empty catalog.
//! Every save overwrites the slot wholesale.

use std::collections::HashMap;

use crate::models::Boutique;

/// Plugin-data key holding the serialized catalog
pub const BOUTIQUE_KEY: &str = "boutique";

/// Value of a slot that has never been written or was cleared
pub const EMPTY_SENTINEL: &str = "";

/// Document-scoped key/value storage provided by the host
pub trait PluginData {
    /// Read a value, `""` when the key was never written
    fn get_plugin_data(&self, key: &str) -> anyhow::Result<String>;

    /// Overwrite a value
    fn set_plugin_data(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// In-memory plugin data for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryPluginData {
    values: HashMap<String, String>,
}

impl MemoryPluginData {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PluginData for MemoryPluginData {
    fn get_plugin_data(&self, key: &str) -> anyhow::Result<String> {
        Ok(self.values.get(key).cloned().unwrap_or_default())
    }

    fn set_plugin_data(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] anyhow::Error),

    #[error("Saved boutique is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Failed to serialize boutique: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Loads and saves the catalog through a plugin-data port
pub struct BoutiqueStore<P: PluginData> {
    data: P,
}

impl<P: PluginData> BoutiqueStore<P> {
    pub fn new(data: P) -> Self {
        Self { data }
    }

    /// Load the saved catalog; an empty slot yields an empty catalog
    pub fn load(&self) -> Result<Boutique, StoreError> {
        let raw = self.data.get_plugin_data(BOUTIQUE_KEY)?;
        if raw == EMPTY_SENTINEL {
            return Ok(Boutique::new());
        }
        serde_json::from_str(&raw).map_err(StoreError::Corrupt)
    }

    /// Replace the saved catalog
    pub fn save(&mut self, boutique: &Boutique) -> Result<(), StoreError> {
        let raw = serde_json::to_string(boutique).map_err(StoreError::Serialize)?;
        self.data.set_plugin_data(BOUTIQUE_KEY, &raw)?;
        Ok(())
    }

    /// Discard every stand
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.data.set_plugin_data(BOUTIQUE_KEY, EMPTY_SENTINEL)?;
        Ok(())
    }

    /// True when nothing has been saved (or the slot was cleared)
    pub fn is_empty_slot(&self) -> Result<bool, StoreError> {
        Ok(self.data.get_plugin_data(BOUTIQUE_KEY)? == EMPTY_SENTINEL)
    }

    pub fn plugin_data(&self) -> &P {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stand, Variation};

    fn sample() -> Boutique {
        Boutique::from(vec![
            Stand {
                name: "Social".to_string(),
                variations: vec![
                    Variation::named(1200.0, 630.0, "Facebook"),
                    Variation::new(1080.0, 1080.0),
                ],
            },
            Stand::new("Empty"),
        ])
    }

    #[test]
    fn test_empty_slot_loads_empty_catalog() {
        let store = BoutiqueStore::new(MemoryPluginData::new());
        assert!(store.is_empty_slot().unwrap());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut store = BoutiqueStore::new(MemoryPluginData::new());
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn test_saved_empty_catalog_is_not_an_empty_slot() {
        let mut store = BoutiqueStore::new(MemoryPluginData::new());
        store.save(&Boutique::new()).unwrap();
        assert!(!store.is_empty_slot().unwrap());
        assert_eq!(store.load().unwrap(), Boutique::new());
        assert_eq!(
            store.plugin_data().get_plugin_data(BOUTIQUE_KEY).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_clear_writes_sentinel() {
        let mut store = BoutiqueStore::new(MemoryPluginData::new());
        store.save(&sample()).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty_slot().unwrap());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_slot_is_reported() {
        let mut data = MemoryPluginData::new();
        data.set_plugin_data(BOUTIQUE_KEY, "{not json").unwrap();
        let store = BoutiqueStore::new(data);
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
