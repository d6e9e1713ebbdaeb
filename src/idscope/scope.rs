//! # Identifier Mapping
//!
//! An [`IdMap`] records which replacement was chosen for each original
//! identifier during a rewrite. Every reference to the same original within
//! one mapping converges on the same replacement.
//!
//! Generated replacements are also entered as keys mapping to themselves:
//!
//! ```text
//! panel                   -> scoped-id-panel-Xk2...
//! scoped-id-panel-Xk2...  -> scoped-id-panel-Xk2...
//! ```
//!
//! so a value that has already been rewritten is never rewritten again, even
//! when the same node is processed twice or a later token happens to equal a
//! generated id.
//!
//! Mappings read back from JSON are closed the same way, so a saved file only
//! needs the `original -> replacement` pairs.
//!
//! A mapping lives for one top-level call unless the caller keeps it and passes
//! it back in, e.g. to scope several fragments of one document consistently.

use crate::error::Result;
use crate::json;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, String>", into = "IndexMap<String, String>")]
pub struct IdMap {
    ids: IndexMap<String, String>,
}

impl From<IndexMap<String, String>> for IdMap {
    fn from(mut ids: IndexMap<String, String>) -> Self {
        let replacements: Vec<String> = ids.values().cloned().collect();
        for replacement in replacements {
            ids.entry(replacement.clone()).or_insert(replacement);
        }
        Self { ids }
    }
}

impl From<IdMap> for IndexMap<String, String> {
    fn from(map: IdMap) -> Self {
        map.ids
    }
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.ids.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Record `original -> replacement` together with the self-mapping of
    /// `replacement`.
    pub fn insert(&mut self, original: &str, replacement: &str) {
        self.ids.insert(original.to_string(), replacement.to_string());
        self.ids.insert(replacement.to_string(), replacement.to_string());
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Original ids and their replacements, without the self-mappings.
    pub fn translations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ids
            .iter()
            .filter(|(k, v)| k != v)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Load a mapping saved by [`IdMap::save`]; a missing file is an empty map.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        json::load_or_default(path.as_ref())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        json::save(path.as_ref(), self)
    }
}
