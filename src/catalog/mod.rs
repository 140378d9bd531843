//! Activity catalogue lookup
//!
//! The progress engine never reaches for a catalogue on its own: whoever
//! evaluates achievements hands it a [`CatalogLookup`]. The usual one is a
//! [`LayeredCatalog`] that puts the user's custom activities over the
//! static [`reference_catalog`].

mod reference;

pub use reference::reference_catalog;

use crate::domain::{ActivityType, CatalogItem};

/// Read-only access to catalogue entries by id
pub trait CatalogLookup {
    /// Find an entry by id
    fn lookup(&self, id: &str) -> Option<&CatalogItem>;
}

impl CatalogLookup for [CatalogItem] {
    fn lookup(&self, id: &str) -> Option<&CatalogItem> {
        self.iter().find(|item| item.id == id)
    }
}

impl CatalogLookup for Vec<CatalogItem> {
    fn lookup(&self, id: &str) -> Option<&CatalogItem> {
        self.as_slice().lookup(id)
    }
}

/// Custom activities layered on top of a reference list
///
/// Custom entries shadow reference entries with the same id.
#[derive(Debug, Clone, Copy)]
pub struct LayeredCatalog<'a> {
    reference: &'a [CatalogItem],
    custom: &'a [CatalogItem],
}

impl<'a> LayeredCatalog<'a> {
    pub fn new(reference: &'a [CatalogItem], custom: &'a [CatalogItem]) -> Self {
        Self { reference, custom }
    }

    /// Find an entry by id, custom entries first
    pub fn get(&self, id: &str) -> Option<&'a CatalogItem> {
        self.custom.lookup(id).or_else(|| self.reference.lookup(id))
    }

    /// Every visible entry, reference first, shadowed ones skipped
    pub fn all(&self) -> Vec<&'a CatalogItem> {
        self.reference
            .iter()
            .filter(|item| self.custom.lookup(&item.id).is_none())
            .chain(self.custom.iter())
            .collect()
    }

    /// Entries in a category
    pub fn by_category(&self, category: &str) -> Vec<&'a CatalogItem> {
        self.all()
            .into_iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Entries of a type
    pub fn by_type(&self, activity_type: ActivityType) -> Vec<&'a CatalogItem> {
        self.all()
            .into_iter()
            .filter(|item| item.activity_type == activity_type)
            .collect()
    }
}

impl CatalogLookup for LayeredCatalog<'_> {
    fn lookup(&self, id: &str) -> Option<&CatalogItem> {
        self.get(id)
    }
}
