use crate::{
    client::Client,
    config::Config,
    error::ConsoleError,
    types::{Branch, TenantId},
};

/// API resource for `/api/tenants/{tenant_id}/branches`
pub struct Branches<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Branches<'c, C> {
    /// Creates a new Branches resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Lists the branches of a tenant. An unknown tenant is a 404 `Api` error;
    /// a tenant without branches yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn list_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Branch>, ConsoleError> {
        self.client
            .get(&format!("/api/tenants/{tenant_id}/branches"))
            .await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Branches API resource
    #[must_use]
    pub const fn branches(&self) -> Branches<'_, C> {
        Branches::new(self)
    }
}
