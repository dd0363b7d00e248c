#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! Async client for the configuration console API: tenants, branches,
//! products, and the per-branch module catalog.
//!
//! ```no_run
//! use console_async::{Client, ConsoleConfig};
//!
//! # async fn example() -> Result<(), console_async::ConsoleError> {
//! let client = Client::with_config(ConsoleConfig::new().with_api_base("http://localhost:5000"));
//! let modules = client.modules().available(7, 3).await?;
//! for m in modules {
//!     println!("{} {} configured={}", m.id, m.name, m.is_configured);
//! }
//! # Ok(())
//! # }
//! ```

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Retry logic utilities
pub mod retry;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::ConsoleConfig;
pub use crate::error::{ApiErrorObject, ConsoleError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, ConsoleConfig};
}
