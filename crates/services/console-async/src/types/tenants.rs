use serde::{Deserialize, Serialize};

use super::common::TenantId;

/// Entry of `GET /api/tenants`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantSummary {
    /// Tenant identifier
    pub id: TenantId,
    /// Display name; the console allows tenants without one
    #[serde(default)]
    pub name: Option<String>,
}

impl TenantSummary {
    /// Name to show in a selector, falling back to the identifier
    #[must_use]
    pub fn label(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Tenant {}", self.id),
        }
    }
}
