//! The module picker: load a catalog, apply the operator's toggles, then show
//! or submit the result.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use console_async::types::{BranchId, ModuleId, ProductId, SaveModulesRequest, SaveStatus, TenantId};
use console_async::{Client, config::Config};
use module_selection::{CascadeSelector, LoadOutcome, Preselection, Reconciler, ScopeChange};

use crate::render::{self, ModuleView};
use crate::settings::ModuleConsoleSettings;

#[derive(Debug, Args)]
pub struct ScopeArgs {
    /// Branch whose modules are configured
    #[arg(long)]
    pub branch: BranchId,

    /// Product whose modules are listed
    #[arg(long)]
    pub product: ProductId,
}

#[derive(Debug, Args)]
pub struct SelectionArgs {
    /// Check a module after the catalog loads (repeatable)
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<ModuleId>,

    /// Uncheck a module after the catalog loads (repeatable, applied after --select)
    #[arg(long = "deselect", value_name = "ID")]
    pub deselect: Vec<ModuleId>,

    /// Comma-separated ids to preselect instead of `modules.preselected`
    #[arg(long, value_name = "IDS")]
    pub preselect: Option<String>,
}

#[derive(Debug, Args)]
pub struct ModulesArgs {
    /// Tenant owning the branch
    #[arg(long)]
    pub tenant: Option<TenantId>,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Only list modules whose name contains this text
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Tenant owning the branch
    #[arg(long)]
    pub tenant: TenantId,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Send the changes; without this only the plan is printed
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn show<C: Config>(
    client: &Client<C>,
    settings: &ModuleConsoleSettings,
    args: ModulesArgs,
) -> Result<()> {
    let reconciler = prepare(client, settings, args.tenant, &args.scope, &args.selection).await?;
    let Some(view) = ModuleView::new(&reconciler, &args.filter) else {
        bail!("No catalog loaded");
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view.render());
    }
    Ok(())
}

pub async fn apply<C: Config>(
    client: &Client<C>,
    settings: &ModuleConsoleSettings,
    args: ApplyArgs,
) -> Result<()> {
    let (branch, product) = (args.scope.branch, args.scope.product);
    let reconciler = prepare(client, settings, Some(args.tenant), &args.scope, &args.selection).await?;

    let partition = reconciler.partition();
    print!("{}", render::summary(&partition));
    if !partition.has_pending_changes() {
        println!("No pending changes.");
        return Ok(());
    }

    let submission = reconciler.submission();
    if !args.yes {
        println!(
            "Would save module ids [{}] and unconfigure {} module(s). Re-run with --yes to apply.",
            submission.serialized,
            submission.to_remove.len()
        );
        return Ok(());
    }

    let request = SaveModulesRequest::new(args.tenant, branch, product, submission.serialized);
    let saved = client
        .modules()
        .save(request)
        .await
        .context("Failed to save module selection")?;
    match saved.status {
        SaveStatus::Error => bail!("Console rejected the selection: {}", saved.message),
        SaveStatus::Success => println!("{} {}", "OK".green(), saved.message),
        SaveStatus::Info => println!("{} {}", "INFO".blue(), saved.message),
    }

    let mut failed = 0usize;
    for module_id in submission.to_remove {
        match client.modules().unconfigure(branch, product, module_id).await {
            Ok(resp) => println!("{} module {module_id}: {}", "REMOVED".yellow(), resp.message),
            Err(e) => {
                failed += 1;
                tracing::warn!(module_id, error = %e, "unconfigure failed");
                eprintln!("{} module {module_id}: {e}", "ERROR".red());
            }
        }
    }
    if failed > 0 {
        bail!("{failed} module(s) could not be unconfigured");
    }
    Ok(())
}

pub async fn unconfigure<C: Config>(
    client: &Client<C>,
    branch_id: BranchId,
    product_id: ProductId,
    module_id: ModuleId,
) -> Result<()> {
    let resp = client
        .modules()
        .unconfigure(branch_id, product_id, module_id)
        .await
        .with_context(|| format!("Failed to unconfigure module {module_id}"))?;
    println!("{} {}", "OK".green(), resp.message);
    Ok(())
}

/// Walks the selector chain, loads the catalog, and applies the toggles given
/// on the command line.
async fn prepare<C: Config>(
    client: &Client<C>,
    settings: &ModuleConsoleSettings,
    tenant: Option<TenantId>,
    scope: &ScopeArgs,
    selection: &SelectionArgs,
) -> Result<Reconciler> {
    let preselection = selection
        .preselect
        .as_deref()
        .map_or_else(|| settings.modules.preselection(), Preselection::parse);
    let mut reconciler = Reconciler::new(settings.modules.sequence_map(), preselection)
        .with_load_timeout(settings.api.load_timeout());

    let mut cascade = CascadeSelector::new();
    if let Some(tenant) = tenant {
        cascade.select_tenant(tenant);
    }
    cascade.select_branch(scope.branch);
    let ScopeChange::Load {
        branch_id,
        product_id,
    } = cascade.select_product(scope.product)
    else {
        bail!("--branch and --product must both be non-zero");
    };

    match reconciler.load_catalog(client, branch_id, product_id).await {
        LoadOutcome::Loaded { modules, selected } => {
            tracing::debug!(modules, selected, "catalog ready");
        }
        LoadOutcome::Failed(failure) => {
            bail!("Could not load modules for branch {branch_id}, product {product_id}: {failure}")
        }
        LoadOutcome::Empty | LoadOutcome::Stale => bail!("No catalog loaded"),
    }

    let toggles = selection
        .select
        .iter()
        .map(|&id| (id, true))
        .chain(selection.deselect.iter().map(|&id| (id, false)));
    for (id, included) in toggles {
        if !reconciler.catalog().contains(id) {
            eprintln!("{} module {id} is not offered for this product", "WARN".yellow());
        }
        reconciler.toggle(id, included);
    }
    Ok(reconciler)
}
