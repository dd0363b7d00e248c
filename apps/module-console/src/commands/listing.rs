//! Read-only listings that feed the tenant → branch → product choice.

use anyhow::{Context, Result};
use console_async::types::{BranchId, ProductId, TenantId};
use console_async::{Client, config::Config};

use crate::render;

pub async fn tenants<C: Config>(client: &Client<C>) -> Result<()> {
    let tenants = client
        .tenants()
        .list()
        .await
        .context("Failed to list tenants")?;
    print!("{}", render::tenants(&tenants));
    Ok(())
}

pub async fn branches<C: Config>(client: &Client<C>, tenant_id: TenantId) -> Result<()> {
    let branches = client
        .branches()
        .list_for_tenant(tenant_id)
        .await
        .with_context(|| format!("Failed to list branches for tenant {tenant_id}"))?;
    print!("{}", render::branches(&branches));
    Ok(())
}

pub async fn products<C: Config>(client: &Client<C>) -> Result<()> {
    let products = client
        .products()
        .list()
        .await
        .context("Failed to list products")?;
    print!("{}", render::products(&products));
    Ok(())
}

/// Modules the console currently has on record for a (branch, product) pair.
pub async fn configured<C: Config>(
    client: &Client<C>,
    branch_id: BranchId,
    product_id: ProductId,
) -> Result<()> {
    let modules = client
        .modules()
        .configured(branch_id, product_id)
        .await
        .with_context(|| {
            format!("Failed to list configured modules for branch {branch_id}, product {product_id}")
        })?;
    if modules.is_empty() {
        println!("No modules configured.");
    }
    for m in modules {
        println!("{:>6}  {}", m.module_id, m.module_name);
    }
    Ok(())
}
