//! The module catalog of one (branch, product) pair.

use std::collections::{HashMap, HashSet};

use console_async::types::{AvailableModule, BranchId, ModuleId, ProductId};
use serde::{Deserialize, Serialize};

/// Display position for modules the sequence map does not mention.
pub const DEFAULT_SEQUENCE: u32 = 9999;

/// Display order lookup, module id to sequence number.
///
/// Ids missing from the map sort last with [`DEFAULT_SEQUENCE`] unless a
/// different fallback is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceMap {
    #[serde(default)]
    entries: HashMap<ModuleId, u32>,
    #[serde(default = "default_sequence")]
    fallback: u32,
}

const fn default_sequence() -> u32 {
    DEFAULT_SEQUENCE
}

impl Default for SequenceMap {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: DEFAULT_SEQUENCE,
        }
    }
}

impl SequenceMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sequence for `id`, or the fallback
    pub fn get(&self, id: ModuleId) -> u32 {
        self.entries.get(&id).copied().unwrap_or(self.fallback)
    }

    pub fn insert(&mut self, id: ModuleId, sequence: u32) {
        self.entries.insert(id, sequence);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ModuleId, u32)> for SequenceMap {
    fn from_iter<I: IntoIterator<Item = (ModuleId, u32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            fallback: DEFAULT_SEQUENCE,
        }
    }
}

impl From<HashMap<ModuleId, u32>> for SequenceMap {
    fn from(entries: HashMap<ModuleId, u32>) -> Self {
        Self {
            entries,
            fallback: DEFAULT_SEQUENCE,
        }
    }
}

/// A module as the reconciler sees it: catalog entry plus resolved sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub is_configured: bool,
    pub sequence: u32,
}

/// Modules available for exactly one (branch, product) pair, in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    scope: Option<(BranchId, ProductId)>,
    modules: Vec<Module>,
}

impl Catalog {
    /// Catalog with no scope and no modules
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a catalog from the console response.
    ///
    /// Sequences are resolved here, once. Entries repeating an id already seen
    /// are dropped; zero ids are not valid module keys and are dropped too.
    #[must_use]
    pub fn ingest(
        branch_id: BranchId,
        product_id: ProductId,
        entries: Vec<AvailableModule>,
        sequences: &SequenceMap,
    ) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut modules = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.id == 0 || !seen.insert(entry.id) {
                tracing::debug!(module_id = entry.id, "dropping duplicate or invalid catalog entry");
                continue;
            }
            modules.push(Module {
                id: entry.id,
                sequence: sequences.get(entry.id),
                name: entry.name,
                is_configured: entry.is_configured,
            });
        }
        Self {
            scope: Some((branch_id, product_id)),
            modules,
        }
    }

    /// The (branch, product) pair this catalog belongs to
    pub const fn scope(&self) -> Option<(BranchId, ProductId)> {
        self.scope
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
