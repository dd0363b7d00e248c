//! Where catalogs come from.

use std::future::Future;

use console_async::{
    Client,
    config::Config,
    types::{AvailableModule, BranchId, ProductId},
};

use crate::error::LoadFailure;

/// Source of module catalogs for a (branch, product) pair.
///
/// The console client is the production implementation; tests plug in
/// in-memory providers.
pub trait CatalogProvider {
    /// Fetches the modules available for `product_id`, flagged with whether
    /// each is configured at `branch_id`.
    fn fetch_catalog(
        &self,
        branch_id: BranchId,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Vec<AvailableModule>, LoadFailure>> + Send;
}

impl<C: Config> CatalogProvider for Client<C> {
    async fn fetch_catalog(
        &self,
        branch_id: BranchId,
        product_id: ProductId,
    ) -> Result<Vec<AvailableModule>, LoadFailure> {
        Ok(self.modules().available(product_id, branch_id).await?)
    }
}
