use serde::{Deserialize, Serialize};

use super::common::{BranchId, TenantId};

/// Entry of `GET /api/tenants/{tenant_id}/branches`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Branch identifier
    pub branch_id: BranchId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle status, e.g. `"active"`
    #[serde(default)]
    pub status: Option<String>,
    /// Short branch code
    #[serde(default)]
    pub code: Option<String>,
    /// Country the branch operates in
    #[serde(default)]
    pub country_id: Option<u64>,
    /// Owning tenant
    pub tenant_id: TenantId,
}
