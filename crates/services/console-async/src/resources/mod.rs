//! API resource implementations for the console client

/// Branch listing resource
pub mod branches;
/// Module catalog and configuration resource
pub mod modules;
/// Product listing resource
pub mod products;
/// Tenant listing resource
pub mod tenants;

pub use branches::Branches;
pub use modules::Modules;
pub use products::Products;
pub use tenants::Tenants;
