use serde::Serialize;

use crate::{
    client::Client,
    config::Config,
    error::ConsoleError,
    types::{
        AvailableModule, BranchId, ConfiguredModule, ModuleId, ProductId, SaveModulesRequest,
        SaveModulesResponse, UnconfigureResponse,
    },
};

#[derive(Serialize)]
struct BranchQuery {
    branch_id: BranchId,
}

/// API resource for the per-branch module catalog and its configuration
pub struct Modules<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Modules<'c, C> {
    /// Creates a new Modules resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Modules offered by `product_id`, each flagged with whether it is
    /// already configured at `branch_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn available(
        &self,
        product_id: ProductId,
        branch_id: BranchId,
    ) -> Result<Vec<AvailableModule>, ConsoleError> {
        self.client
            .get_with_query(
                &format!("/api/products/{product_id}/modules"),
                &BranchQuery { branch_id },
            )
            .await
    }

    /// Modules currently configured for a (branch, product) pair
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn configured(
        &self,
        branch_id: BranchId,
        product_id: ProductId,
    ) -> Result<Vec<ConfiguredModule>, ConsoleError> {
        self.client
            .get(&format!(
                "/api/branches/{branch_id}/products/{product_id}/configured-modules"
            ))
            .await
    }

    /// Submits a module selection. The console only adds modules here;
    /// removals go through [`Self::unconfigure`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn save(&self, req: SaveModulesRequest) -> Result<SaveModulesResponse, ConsoleError> {
        self.client
            .post("/api/config/save-product-modules", req)
            .await
    }

    /// Removes one module from a branch's configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn unconfigure(
        &self,
        branch_id: BranchId,
        product_id: ProductId,
        module_id: ModuleId,
    ) -> Result<UnconfigureResponse, ConsoleError> {
        self.client
            .delete(&format!(
                "/api/branches/{branch_id}/products/{product_id}/modules/{module_id}"
            ))
            .await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Modules API resource
    #[must_use]
    pub const fn modules(&self) -> Modules<'_, C> {
        Modules::new(self)
    }
}
