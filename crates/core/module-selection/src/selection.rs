//! Insertion-ordered module id sets and the comma-separated id format the
//! console uses for preselection and submission.

use std::collections::HashSet;

use console_async::types::ModuleId;

/// Parses a comma-separated id list.
///
/// Tokens are trimmed; empty, non-numeric, negative, and zero tokens are
/// dropped. Duplicates are kept; callers that need a set collect into one.
pub fn parse_id_list(raw: &str) -> impl Iterator<Item = ModuleId> + '_ {
    raw.split(',')
        .filter_map(|token| token.trim().parse::<ModuleId>().ok())
        .filter(|id| *id != 0)
}

/// Set of module ids that remembers insertion order.
///
/// Removing an id and adding it again moves it to the end, so the serialized
/// form always reflects the order in which the operator picked modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    order: Vec<ModuleId>,
    members: HashSet<ModuleId>,
}

impl SelectionSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a set from its serialized form.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        parse_id_list(raw).collect()
    }

    /// Adds `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: ModuleId) -> bool {
        if self.members.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    /// Removes `id`; returns `false` if it was absent.
    pub fn remove(&mut self, id: ModuleId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|&x| x != id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// Ids in insertion order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = ModuleId> + '_ {
        self.order.iter().copied()
    }

    /// Ids joined by `,` in insertion order; empty string for an empty set.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.order
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<ModuleId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ModuleId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<ModuleId> for SelectionSet {
    fn extend<I: IntoIterator<Item = ModuleId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

/// Module ids injected into the page before the catalog loads.
///
/// Parsed once; applied on every successful catalog load, restricted to ids
/// the new catalog actually contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preselection {
    ids: Vec<ModuleId>,
}

impl Preselection {
    /// Parses the injected comma-separated string, keeping first occurrences.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut seen = HashSet::new();
        let ids = parse_id_list(raw).filter(|id| seen.insert(*id)).collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[ModuleId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<ModuleId>> for Preselection {
    fn from(ids: Vec<ModuleId>) -> Self {
        let mut seen = HashSet::new();
        Self {
            ids: ids
                .into_iter()
                .filter(|id| *id != 0 && seen.insert(*id))
                .collect(),
        }
    }
}
