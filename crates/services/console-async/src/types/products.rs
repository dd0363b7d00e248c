use serde::{Deserialize, Serialize};

use super::common::ProductId;

/// Entry of `GET /api/products`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSummary {
    /// Product identifier
    pub product_id: ProductId,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Product code, used when no name is set
    #[serde(default)]
    pub code: Option<String>,
}

impl ProductSummary {
    /// Name to show in a selector: name, then code, then `Product {id}`
    #[must_use]
    pub fn label(&self) -> String {
        [self.name.as_deref(), self.code.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map_or_else(|| format!("Product {}", self.product_id), ToString::to_string)
    }
}
