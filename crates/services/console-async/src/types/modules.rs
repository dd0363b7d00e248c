use serde::{Deserialize, Serialize};

use super::common::{BranchId, ModuleId, ProductId, TenantId};

/// Entry of `GET /api/products/{product_id}/modules?branch_id={branch_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailableModule {
    /// Module identifier
    pub id: ModuleId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Whether the module is already configured for the branch
    #[serde(default)]
    pub is_configured: bool,
}

/// Entry of `GET /api/branches/{branch_id}/products/{product_id}/configured-modules`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfiguredModule {
    /// Branch the module is configured for
    pub branch_id: BranchId,
    /// Product the module belongs to
    pub product_id: ProductId,
    /// Module identifier
    pub module_id: ModuleId,
    /// Module display name
    pub module_name: String,
}

/// Body of `POST /api/config/save-product-modules`
///
/// `module_ids_hidden` carries the serialized selection exactly as the console
/// form would submit it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveModulesRequest {
    /// Tenant owning the branch
    pub tenant_id: TenantId,
    /// Branch being configured
    pub branch_id: BranchId,
    /// Product whose modules are configured
    pub product_id: ProductId,
    /// Comma-separated module identifiers
    pub module_ids_hidden: String,
}

impl SaveModulesRequest {
    /// Builds a save request from a serialized selection
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        branch_id: BranchId,
        product_id: ProductId,
        module_ids: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            branch_id,
            product_id,
            module_ids_hidden: module_ids.into(),
        }
    }
}

/// Outcome reported by the save endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// At least one module was added
    Success,
    /// Nothing changed
    Info,
    /// The console rejected the request
    Error,
}

/// Response of `POST /api/config/save-product-modules`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveModulesResponse {
    /// Outcome kind
    pub status: SaveStatus,
    /// Human-readable summary
    pub message: String,
    /// Names of modules that were newly configured
    #[serde(default)]
    pub modules_added: Vec<String>,
    /// Names of modules that were already configured
    #[serde(default)]
    pub modules_skipped_configured: Vec<String>,
}

/// Response of `DELETE /api/branches/{b}/products/{p}/modules/{m}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnconfigureResponse {
    /// Outcome kind, usually `"success"`
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable summary
    #[serde(default)]
    pub message: String,
}
