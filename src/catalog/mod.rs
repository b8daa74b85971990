//! Catalog editor
//!
//! CRUD over stands and their variations. Every mutation loads the whole
//! catalog, changes it, and saves it back before returning what changed.
//!
//! Stands and variations are addressed by position. New entries go to the
//! front, so removing or adding one shifts the ids of everything after it.

use serde::{Deserialize, Serialize};

use crate::models::{is_valid_side, Boutique, Stand, Variation};
use crate::store::{BoutiqueStore, PluginData, StoreError};

/// Catalog errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Stand not found: {0}")]
    StandNotFound(usize),

    #[error("Variation {variation_id} not found in stand {stand_id}")]
    VariationNotFound { stand_id: usize, variation_id: usize },

    #[error("Invalid size {width}x{height}: width and height must be positive")]
    InvalidSize { width: f64, height: f64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A stand after one of its fields or variations changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandChange {
    pub stand_id: usize,
    pub stand: Stand,
}

/// Acknowledgement of a variation overwrite
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditedVariation {
    pub stand_id: usize,
    pub variation_id: usize,
    pub width: f64,
    pub height: f64,
}

/// Read-modify-write editor over the saved catalog
pub struct CatalogEditor<P: PluginData> {
    store: BoutiqueStore<P>,
}

impl<P: PluginData> CatalogEditor<P> {
    pub fn new(store: BoutiqueStore<P>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &BoutiqueStore<P> {
        &self.store
    }

    /// The full saved catalog
    pub fn saved_boutique(&self) -> Result<Boutique, CatalogError> {
        Ok(self.store.load()?)
    }

    /// Look up a stand without changing anything
    pub fn saved_stand(&self, stand_id: usize) -> Result<Stand, CatalogError> {
        let boutique = self.store.load()?;
        boutique
            .get(stand_id)
            .cloned()
            .ok_or(CatalogError::StandNotFound(stand_id))
    }

    /// Look up a variation without changing anything
    pub fn saved_variation(
        &self,
        stand_id: usize,
        variation_id: usize,
    ) -> Result<Variation, CatalogError> {
        let stand = self.saved_stand(stand_id)?;
        stand
            .variations
            .get(variation_id)
            .cloned()
            .ok_or(CatalogError::VariationNotFound {
                stand_id,
                variation_id,
            })
    }

    /// Insert an empty stand at the front
    pub fn add_stand(&mut self, name: &str) -> Result<Boutique, CatalogError> {
        let mut boutique = self.store.load()?;
        boutique.0.insert(0, Stand::new(name));
        self.store.save(&boutique)?;
        Ok(boutique)
    }

    /// Rename a stand in place
    pub fn edit_stand(&mut self, stand_id: usize, name: &str) -> Result<StandChange, CatalogError> {
        let mut boutique = self.store.load()?;
        let stand = stand_mut(&mut boutique, stand_id)?;
        stand.name = name.to_string();
        let stand = stand.clone();
        self.store.save(&boutique)?;
        Ok(StandChange { stand_id, stand })
    }

    /// Delete a stand; later stands move down by one
    pub fn remove_stand(&mut self, stand_id: usize) -> Result<Boutique, CatalogError> {
        let mut boutique = self.store.load()?;
        if stand_id >= boutique.len() {
            return Err(CatalogError::StandNotFound(stand_id));
        }
        boutique.0.remove(stand_id);
        self.store.save(&boutique)?;
        Ok(boutique)
    }

    /// Insert an unnamed variation at the front of a stand
    pub fn add_variation(
        &mut self,
        stand_id: usize,
        width: f64,
        height: f64,
    ) -> Result<StandChange, CatalogError> {
        check_size(width, height)?;
        let mut boutique = self.store.load()?;
        let stand = stand_mut(&mut boutique, stand_id)?;
        stand.variations.insert(0, Variation::new(width, height));
        let stand = stand.clone();
        self.store.save(&boutique)?;
        Ok(StandChange { stand_id, stand })
    }

    /// Overwrite a variation with a fresh unnamed size
    pub fn edit_variation(
        &mut self,
        stand_id: usize,
        variation_id: usize,
        width: f64,
        height: f64,
    ) -> Result<EditedVariation, CatalogError> {
        check_size(width, height)?;
        let mut boutique = self.store.load()?;
        let stand = stand_mut(&mut boutique, stand_id)?;
        let slot = stand
            .variations
            .get_mut(variation_id)
            .ok_or(CatalogError::VariationNotFound {
                stand_id,
                variation_id,
            })?;
        // Replaces the whole entry, any name is dropped
        *slot = Variation::new(width, height);
        self.store.save(&boutique)?;
        Ok(EditedVariation {
            stand_id,
            variation_id,
            width,
            height,
        })
    }

    /// Delete a variation; later variations move down by one
    pub fn remove_variation(
        &mut self,
        stand_id: usize,
        variation_id: usize,
    ) -> Result<StandChange, CatalogError> {
        let mut boutique = self.store.load()?;
        let stand = stand_mut(&mut boutique, stand_id)?;
        if variation_id >= stand.variations.len() {
            return Err(CatalogError::VariationNotFound {
                stand_id,
                variation_id,
            });
        }
        stand.variations.remove(variation_id);
        let stand = stand.clone();
        self.store.save(&boutique)?;
        Ok(StandChange { stand_id, stand })
    }

    /// Replace the whole catalog
    pub fn import(&mut self, boutique: &Boutique) -> Result<(), CatalogError> {
        self.store.save(boutique)?;
        Ok(())
    }

    /// Discard every stand
    pub fn dump(&mut self) -> Result<(), CatalogError> {
        self.store.clear()?;
        Ok(())
    }
}

fn stand_mut(boutique: &mut Boutique, stand_id: usize) -> Result<&mut Stand, CatalogError> {
    boutique
        .get_mut(stand_id)
        .ok_or(CatalogError::StandNotFound(stand_id))
}

fn check_size(width: f64, height: f64) -> Result<(), CatalogError> {
    if is_valid_side(width) && is_valid_side(height) {
        Ok(())
    } else {
        Err(CatalogError::InvalidSize { width, height })
    }
}
