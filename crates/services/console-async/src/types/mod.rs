//! Request and response types for the console API

/// Branch listing types
pub mod branches;
/// Identifier aliases shared across endpoints
pub mod common;
/// Module catalog and configuration types
pub mod modules;
/// Product listing types
pub mod products;
/// Tenant listing types
pub mod tenants;

pub use branches::Branch;
pub use common::*;
pub use modules::{
    AvailableModule, ConfiguredModule, SaveModulesRequest, SaveModulesResponse, SaveStatus,
    UnconfigureResponse,
};
pub use products::ProductSummary;
pub use tenants::TenantSummary;
