use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Where a catalog entry was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub file: String,
    pub line: usize,
    pub column: usize,
    /// Qualified name of the declaring group.
    pub group: String,
}

/// One property of the final catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub key: String,
    pub type_signature: String,
    /// Empty when the property has no default.
    pub default_value: String,
    pub non_literal: bool,
    /// Empty when undocumented.
    pub documentation: String,
    pub origin: Origin,
}

/// Key-unique, ordered property catalog. Only the assembler builds one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Insert unless the key is taken; returns the existing entry on conflict.
    pub(super) fn try_insert(&mut self, entry: CatalogEntry) -> Result<(), &CatalogEntry> {
        match self.entries.entry(entry.key.clone()) {
            indexmap::map::Entry::Occupied(existing) => Err(existing.into_mut()),
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = indexmap::map::Values<'a, String, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Serialized as an ordered list of entries.
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}
