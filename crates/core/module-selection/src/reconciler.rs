//! Selection state for one module catalog and everything derived from it.

use std::collections::HashSet;
use std::time::Duration;

use console_async::types::{AvailableModule, BranchId, ModuleId, ProductId};
use serde::Serialize;

use crate::catalog::{Catalog, Module, SequenceMap};
use crate::error::LoadFailure;
use crate::provider::CatalogProvider;
use crate::selection::{Preselection, SelectionSet};

/// Upper bound on a single catalog request.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Proof that a load was started; hand it back to [`Reconciler::complete_load`].
///
/// Only the most recently issued ticket is honoured, and only once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a load that is never completed leaves the reconciler empty"]
pub struct LoadTicket {
    generation: u64,
    branch_id: BranchId,
    product_id: ProductId,
}

impl LoadTicket {
    pub const fn branch_id(&self) -> BranchId {
        self.branch_id
    }

    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }
}

/// Result of a catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Catalog replaced; selection reset to baseline plus preselection.
    Loaded { modules: usize, selected: usize },
    /// Branch or product missing; nothing was requested.
    Empty,
    /// The request failed; the reconciler is empty.
    Failed(LoadFailure),
    /// A newer load started before this one finished; the response was ignored.
    Stale,
}

/// Row of the module picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub id: ModuleId,
    pub name: String,
    pub sequence: u32,
    pub checked: bool,
    /// Module was configured when the catalog loaded
    pub configured: bool,
}

/// Label shown next to a partition entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Seq,
    Add,
    Remove,
}

impl Badge {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seq => "Seq",
            Self::Add => "Add",
            Self::Remove => "Remove",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionEntry {
    pub id: ModuleId,
    pub name: String,
    pub sequence: u32,
    pub badge: Badge,
}

/// Pending changes relative to the baseline.
///
/// Modules neither selected nor configured are left out. Each list is ordered
/// by sequence; equal sequences keep catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub kept: Vec<PartitionEntry>,
    pub to_add: Vec<PartitionEntry>,
    pub to_remove: Vec<PartitionEntry>,
}

impl Partition {
    /// True when submitting would change nothing
    pub fn has_pending_changes(&self) -> bool {
        !(self.to_add.is_empty() && self.to_remove.is_empty())
    }
}

/// What a submission has to send: the selection for the save form and the
/// ids the console must unconfigure one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub serialized: String,
    pub to_add: Vec<ModuleId>,
    pub to_remove: Vec<ModuleId>,
}

/// Module selection against one catalog.
///
/// Single writer. Every catalog load goes through [`Self::begin_load`], which
/// clears the previous state and bumps a generation counter. A response whose
/// ticket is not the pending one is discarded, and completing a load retires
/// its ticket.
#[derive(Debug, Clone)]
pub struct Reconciler {
    sequences: SequenceMap,
    preselection: Preselection,
    load_timeout: Duration,
    catalog: Catalog,
    baseline: HashSet<ModuleId>,
    selection: SelectionSet,
    generation: u64,
    pending: Option<u64>,
    ready: bool,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(SequenceMap::default(), Preselection::default())
    }
}

impl Reconciler {
    #[must_use]
    pub fn new(sequences: SequenceMap, preselection: Preselection) -> Self {
        Self {
            sequences,
            preselection,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            catalog: Catalog::empty(),
            baseline: HashSet::new(),
            selection: SelectionSet::new(),
            generation: 0,
            pending: None,
            ready: false,
        }
    }

    #[must_use]
    pub const fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Drops catalog, baseline, and selection, and invalidates in-flight loads.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.catalog = Catalog::empty();
        self.baseline.clear();
        self.selection.clear();
        self.ready = false;
    }

    /// Starts a load for (`branch_id`, `product_id`).
    ///
    /// Always resets first, so ids from the previous catalog cannot leak into
    /// the next one. Returns `None` when either id is zero.
    pub fn begin_load(&mut self, branch_id: BranchId, product_id: ProductId) -> Option<LoadTicket> {
        self.reset();
        if branch_id == 0 || product_id == 0 {
            tracing::debug!(branch_id, product_id, "module scope incomplete, not loading");
            return None;
        }
        self.pending = Some(self.generation);
        Some(LoadTicket {
            generation: self.generation,
            branch_id,
            product_id,
        })
    }

    /// Applies the response for `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<AvailableModule>, LoadFailure>,
    ) -> LoadOutcome {
        if self.pending != Some(ticket.generation) {
            tracing::debug!(
                branch_id = ticket.branch_id,
                product_id = ticket.product_id,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale catalog response"
            );
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(entries) => {
                let catalog =
                    Catalog::ingest(ticket.branch_id, ticket.product_id, entries, &self.sequences);
                self.apply_catalog(catalog);
                tracing::info!(
                    branch_id = ticket.branch_id,
                    product_id = ticket.product_id,
                    modules = self.catalog.len(),
                    configured = self.baseline.len(),
                    selected = self.selection.len(),
                    "module catalog loaded"
                );
                LoadOutcome::Loaded {
                    modules: self.catalog.len(),
                    selected: self.selection.len(),
                }
            }
            Err(failure) => {
                tracing::warn!(
                    branch_id = ticket.branch_id,
                    product_id = ticket.product_id,
                    error = %failure,
                    "failed to load module catalog"
                );
                self.reset();
                LoadOutcome::Failed(failure)
            }
        }
    }

    /// Loads the catalog for (`branch_id`, `product_id`) from `provider`,
    /// giving up after the load timeout.
    pub async fn load_catalog<P>(
        &mut self,
        provider: &P,
        branch_id: BranchId,
        product_id: ProductId,
    ) -> LoadOutcome
    where
        P: CatalogProvider + Sync,
    {
        let Some(ticket) = self.begin_load(branch_id, product_id) else {
            return LoadOutcome::Empty;
        };
        let timeout = self.load_timeout;
        let result = tokio::time::timeout(timeout, provider.fetch_catalog(branch_id, product_id))
            .await
            .unwrap_or(Err(LoadFailure::Timeout(timeout)));
        self.complete_load(ticket, result)
    }

    fn apply_catalog(&mut self, catalog: Catalog) {
        self.baseline = catalog
            .modules()
            .iter()
            .filter(|m| m.is_configured)
            .map(|m| m.id)
            .collect();
        self.selection = catalog
            .modules()
            .iter()
            .filter(|m| m.is_configured)
            .map(|m| m.id)
            .collect();
        for &id in self.preselection.ids() {
            if catalog.contains(id) {
                self.selection.insert(id);
            } else {
                tracing::debug!(module_id = id, "preselected module not in catalog");
            }
        }
        self.catalog = catalog;
        self.ready = true;
    }

    /// Checks or unchecks `module_id`. Ids outside the catalog are ignored.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, module_id: ModuleId, included: bool) -> bool {
        if !self.catalog.contains(module_id) {
            tracing::debug!(module_id, "ignoring toggle for module outside catalog");
            return false;
        }
        if included {
            self.selection.insert(module_id)
        } else {
            self.selection.remove(module_id)
        }
    }

    /// Catalog modules whose name contains `term` (trimmed, case-insensitive),
    /// ordered by sequence, then name, then id.
    pub fn filter(&self, term: &str) -> Vec<&Module> {
        let needle = term.trim().to_lowercase();
        let mut matches: Vec<&Module> = self
            .catalog
            .modules()
            .iter()
            .filter(|m| needle.is_empty() || m.name.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| {
            a.sequence
                .cmp(&b.sequence)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        matches
    }

    /// [`Self::filter`] as picker rows
    pub fn display_list(&self, term: &str) -> Vec<DisplayRow> {
        self.filter(term)
            .into_iter()
            .map(|m| DisplayRow {
                id: m.id,
                name: m.name.clone(),
                sequence: m.sequence,
                checked: self.selection.contains(m.id),
                configured: self.baseline.contains(&m.id),
            })
            .collect()
    }

    pub fn partition(&self) -> Partition {
        let mut partition = Partition::default();
        for m in self.catalog.modules() {
            let selected = self.selection.contains(m.id);
            let configured = self.baseline.contains(&m.id);
            let (list, badge) = match (selected, configured) {
                (true, true) => (&mut partition.kept, Badge::Seq),
                (true, false) => (&mut partition.to_add, Badge::Add),
                (false, true) => (&mut partition.to_remove, Badge::Remove),
                (false, false) => continue,
            };
            list.push(PartitionEntry {
                id: m.id,
                name: m.name.clone(),
                sequence: m.sequence,
                badge,
            });
        }
        for list in [
            &mut partition.kept,
            &mut partition.to_add,
            &mut partition.to_remove,
        ] {
            list.sort_by_key(|e| e.sequence);
        }
        partition
    }

    /// Selection ids joined by `,` in the order they were picked
    pub fn serialize(&self) -> String {
        self.selection.serialize()
    }

    pub fn submission(&self) -> Submission {
        let partition = self.partition();
        Submission {
            serialized: self.serialize(),
            to_add: partition.to_add.iter().map(|e| e.id).collect(),
            to_remove: partition.to_remove.iter().map(|e| e.id).collect(),
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Whether selection controls should be enabled
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, module_id: ModuleId) -> bool {
        self.selection.contains(module_id)
    }

    /// Module was configured when the current catalog loaded
    pub fn is_configured(&self, module_id: ModuleId) -> bool {
        self.baseline.contains(&module_id)
    }

    pub const fn sequences(&self) -> &SequenceMap {
        &self.sequences
    }
}
