//! Tenant → branch → product selector chain.

use console_async::types::{BranchId, ProductId, TenantId};

/// What a selector change means for the module catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeChange {
    /// Both branch and product are set; load their catalog.
    Load { branch_id: BranchId, product_id: ProductId },
    /// The scope is incomplete; reset the reconciler and show nothing.
    Cleared,
    /// Same value as before; nothing to do.
    Unchanged,
}

/// Current tenant, branch, and product selection. Zero means "nothing selected".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSelector {
    tenant: Option<TenantId>,
    branch: Option<BranchId>,
    product: Option<ProductId>,
}

const fn nonzero(id: u64) -> Option<u64> {
    if id == 0 { None } else { Some(id) }
}

impl CascadeSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches tenant. Branches and products are reloaded per tenant, so
    /// both are cleared and the module scope always becomes incomplete.
    pub fn select_tenant(&mut self, tenant_id: TenantId) -> ScopeChange {
        let tenant = nonzero(tenant_id);
        if tenant == self.tenant {
            return ScopeChange::Unchanged;
        }
        self.tenant = tenant;
        self.branch = None;
        self.product = None;
        ScopeChange::Cleared
    }

    pub fn select_branch(&mut self, branch_id: BranchId) -> ScopeChange {
        let branch = nonzero(branch_id);
        if branch == self.branch {
            return ScopeChange::Unchanged;
        }
        self.branch = branch;
        self.scope_change()
    }

    pub fn select_product(&mut self, product_id: ProductId) -> ScopeChange {
        let product = nonzero(product_id);
        if product == self.product {
            return ScopeChange::Unchanged;
        }
        self.product = product;
        self.scope_change()
    }

    /// (branch, product) when both are set
    pub const fn module_scope(&self) -> Option<(BranchId, ProductId)> {
        match (self.branch, self.product) {
            (Some(b), Some(p)) => Some((b, p)),
            _ => None,
        }
    }

    pub const fn tenant(&self) -> Option<TenantId> {
        self.tenant
    }

    pub const fn branch(&self) -> Option<BranchId> {
        self.branch
    }

    pub const fn product(&self) -> Option<ProductId> {
        self.product
    }

    const fn scope_change(&self) -> ScopeChange {
        match self.module_scope() {
            Some((branch_id, product_id)) => ScopeChange::Load {
                branch_id,
                product_id,
            },
            None => ScopeChange::Cleared,
        }
    }
}
