use crate::{client::Client, config::Config, error::ConsoleError, types::TenantSummary};

/// API resource for `/api/tenants`
pub struct Tenants<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Tenants<'c, C> {
    /// Creates a new Tenants resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Lists every tenant
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn list(&self) -> Result<Vec<TenantSummary>, ConsoleError> {
        self.client.get("/api/tenants").await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Tenants API resource
    #[must_use]
    pub const fn tenants(&self) -> Tenants<'_, C> {
        Tenants::new(self)
    }
}
