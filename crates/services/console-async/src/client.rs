use backon::{ExponentialBuilder, Retryable};
use serde::{Serialize, de::DeserializeOwned};

use crate::{config::Config, error::ConsoleError, retry};

/// Console API client
///
/// The client is generic over a [`Config`] implementation that provides the
/// base URL, credentials, and request timeout.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    backoff: ExponentialBuilder,
}

impl Client<crate::config::ConsoleConfig> {
    /// Creates a new client with default configuration
    ///
    /// Reads `CONSOLE_BASE_URL` and `CONSOLE_API_KEY` from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::ConsoleConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(5))
                .timeout(config.request_timeout())
                .build()
                .expect("reqwest client"),
            config,
            backoff: retry::default_backoff_builder(),
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the backoff configuration for retry logic
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) async fn get<O: DeserializeOwned>(&self, path: &str) -> Result<O, ConsoleError> {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .get(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .build()?)
        };
        self.execute(mk).await
    }

    pub(crate) async fn get_with_query<Q, O>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<O, ConsoleError>
    where
        Q: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .get(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .query(query)
                .build()?)
        };
        self.execute(mk).await
    }

    pub(crate) async fn post<I, O>(&self, path: &str, body: I) -> Result<O, ConsoleError>
    where
        I: Serialize + Send + Sync,
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .post(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .json(&body)
                .build()?)
        };
        self.execute(mk).await
    }

    /// Sent once: a DELETE the console committed but answered slowly would
    /// come back 404 on a retry.
    pub(crate) async fn delete<O: DeserializeOwned>(&self, path: &str) -> Result<O, ConsoleError> {
        self.config.validate()?;

        let request = self
            .http
            .delete(self.config.url(path))
            .headers(self.config.headers()?)
            .query(&self.config.query())
            .build()?;
        let bytes = send_once(&self.http, request).await?;
        decode(&bytes)
    }

    async fn execute<O, M, Fut>(&self, mk: M) -> Result<O, ConsoleError>
    where
        O: DeserializeOwned,
        M: Fn() -> Fut + Send + Sync,
        Fut: core::future::Future<Output = Result<reqwest::Request, ConsoleError>> + Send,
    {
        self.config.validate()?;

        let bytes = self.execute_raw(mk).await?;
        decode(&bytes)
    }

    async fn execute_raw<M, Fut>(&self, mk: M) -> Result<bytes::Bytes, ConsoleError>
    where
        M: Fn() -> Fut + Send + Sync,
        Fut: core::future::Future<Output = Result<reqwest::Request, ConsoleError>> + Send,
    {
        let http_client = self.http.clone();

        (|| async { send_once(&http_client, mk().await?).await })
        .retry(self.backoff)
        .when(ConsoleError::is_retryable)
        .notify(|err, dur| {
            tracing::debug!(error = %err, delay = ?dur, "retrying console request");
        })
        .await
    }
}

async fn send_once(
    http: &reqwest::Client,
    request: reqwest::Request,
) -> Result<bytes::Bytes, ConsoleError> {
    let method = request.method().clone();
    let url = request.url().clone();
    let response = http.execute(request).await.map_err(ConsoleError::Reqwest)?;

    let status = response.status();
    let bytes = response.bytes().await.map_err(ConsoleError::Reqwest)?;

    if status.is_success() {
        return Ok(bytes);
    }

    tracing::debug!(%method, %url, status = status.as_u16(), "console request failed");
    Err(crate::error::deserialize_api_error(status, &bytes))
}

fn decode<O: DeserializeOwned>(bytes: &[u8]) -> Result<O, ConsoleError> {
    serde_json::from_slice(bytes).map_err(|e| crate::error::map_deser(&e, bytes))
}
