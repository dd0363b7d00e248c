use crate::{client::Client, config::Config, error::ConsoleError, types::ProductSummary};

/// API resource for `/api/products`
pub struct Products<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Products<'c, C> {
    /// Creates a new Products resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Lists every product
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn list(&self) -> Result<Vec<ProductSummary>, ConsoleError> {
        self.client.get("/api/products").await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Products API resource
    #[must_use]
    pub const fn products(&self) -> Products<'_, C> {
        Products::new(self)
    }
}
