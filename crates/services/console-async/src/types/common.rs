//! Identifier aliases shared across console endpoints

/// Tenant primary key
pub type TenantId = u64;
/// Branch primary key
pub type BranchId = u64;
/// Product primary key
pub type ProductId = u64;
/// Module primary key
pub type ModuleId = u64;
