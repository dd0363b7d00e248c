//! Plain-text rendering of console listings and the module picker.

use std::fmt::Write as _;

use colored::Colorize;
use console_async::types::{Branch, BranchId, ProductId, ProductSummary, TenantSummary};
use module_selection::{Badge, DisplayRow, Partition, PartitionEntry, Reconciler};
use serde::Serialize;

pub fn tenants(tenants: &[TenantSummary]) -> String {
    if tenants.is_empty() {
        return "No tenants.\n".to_string();
    }
    let mut out = String::new();
    for t in tenants {
        let _ = writeln!(out, "{:>6}  {}", t.id, t.label());
    }
    out
}

pub fn branches(branches: &[Branch]) -> String {
    if branches.is_empty() {
        return "No branches for this tenant.\n".to_string();
    }
    let mut out = String::new();
    for b in branches {
        let _ = write!(out, "{:>6}  {}", b.branch_id, b.name);
        if let Some(status) = b.status.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(out, "  ({status})");
        }
        out.push('\n');
    }
    out
}

pub fn products(products: &[ProductSummary]) -> String {
    if products.is_empty() {
        return "No products.\n".to_string();
    }
    let mut out = String::new();
    for p in products {
        let _ = writeln!(out, "{:>6}  {}", p.product_id, p.label());
    }
    out
}

/// Everything the picker shows for one catalog.
#[derive(Debug, Serialize)]
pub struct ModuleView {
    pub branch_id: BranchId,
    pub product_id: ProductId,
    pub filter: String,
    pub modules: Vec<DisplayRow>,
    pub summary: Partition,
    pub selected_count: usize,
    pub module_ids: String,
}

impl ModuleView {
    /// `None` while the reconciler holds no catalog
    pub fn new(reconciler: &Reconciler, filter: &str) -> Option<Self> {
        let (branch_id, product_id) = reconciler.catalog().scope()?;
        Some(Self {
            branch_id,
            product_id,
            filter: filter.trim().to_string(),
            modules: reconciler.display_list(filter),
            summary: reconciler.partition(),
            selected_count: reconciler.selected_count(),
            module_ids: reconciler.serialize(),
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "Modules for branch {}, product {}",
            self.branch_id, self.product_id
        );
        if !self.filter.is_empty() {
            let _ = write!(out, " matching \"{}\"", self.filter);
        }
        out.push_str(":\n");

        if self.modules.is_empty() {
            out.push_str("  (none)\n");
        }
        for row in &self.modules {
            let mark = if row.checked { "[x]" } else { "[ ]" };
            let _ = write!(out, "  {mark} {:>5}  {}  seq {}", row.id, row.name, row.sequence);
            if row.configured {
                let _ = write!(out, "  {}", "configured".dimmed());
            }
            out.push('\n');
        }

        let _ = writeln!(out, "Selected: {}", self.selected_count);
        out.push_str(&summary(&self.summary));
        let _ = writeln!(out, "Module ids: {}", self.module_ids);
        out
    }
}

/// Kept, added, and removed modules with their badges.
pub fn summary(partition: &Partition) -> String {
    let mut out = String::from("Summary:\n");
    let entries = partition
        .kept
        .iter()
        .chain(&partition.to_add)
        .chain(&partition.to_remove);
    let mut any = false;
    for entry in entries {
        any = true;
        let _ = writeln!(out, "  {}", summary_line(entry));
    }
    if !any {
        out.push_str("  (nothing selected or configured)\n");
    }
    out
}

fn summary_line(entry: &PartitionEntry) -> String {
    format!(
        "{}  {:>5}  {}",
        badge(entry.badge, entry.sequence),
        entry.id,
        entry.name
    )
}

fn badge(badge: Badge, sequence: u32) -> String {
    let label = match badge {
        Badge::Seq => format!("Seq {sequence}"),
        Badge::Add | Badge::Remove => badge.label().to_string(),
    };
    let text = format!("{label:<8}");
    match badge {
        Badge::Seq => text.blue().to_string(),
        Badge::Add => text.green().to_string(),
        Badge::Remove => text.red().to_string(),
    }
}
