//! module-console: pick the modules a branch runs for a product.
//!
//! Lists tenants, branches, and products, shows the module catalog of a
//! (branch, product) pair with its pending changes, and submits them.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console_async::types::{BranchId, ModuleId, ProductId, TenantId};

mod commands;
mod merge;
mod render;
mod settings;

use commands::modules::{ApplyArgs, ModulesArgs, ScopeArgs};

#[derive(Parser)]
#[command(name = "module-console")]
#[command(about = "Per-branch, per-product module configuration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Console(ConsoleCommands),

    /// Settings file management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConsoleCommands {
    /// List tenants
    Tenants,

    /// List the branches of a tenant
    Branches {
        #[arg(long)]
        tenant: TenantId,
    },

    /// List products
    Products,

    /// List modules the console has configured for a branch and product
    Configured {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Show the module catalog with checked state and pending changes
    Modules(ModulesArgs),

    /// Save the selection and unconfigure unchecked modules
    Apply(ApplyArgs),

    /// Remove a single module from a branch's configuration
    Unconfigure {
        #[arg(long)]
        branch: BranchId,

        #[arg(long)]
        product: ProductId,

        #[arg(long)]
        module: ModuleId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { command } => {
            init_tracing(cli.verbose, "warn");
            commands::config::execute(command)
        }
        Commands::Console(command) => {
            let loaded = settings::load_merged(&std::env::current_dir()?)?;
            init_tracing(cli.verbose, &loaded.settings.logging.level);
            for warning in &loaded.warnings {
                tracing::warn!(%warning, "settings");
            }
            run(command, &loaded.settings).await
        }
    }
}

async fn run(command: ConsoleCommands, settings: &settings::ModuleConsoleSettings) -> Result<()> {
    let client = commands::client(settings);
    match command {
        ConsoleCommands::Tenants => commands::listing::tenants(&client).await,
        ConsoleCommands::Branches { tenant } => commands::listing::branches(&client, tenant).await,
        ConsoleCommands::Products => commands::listing::products(&client).await,
        ConsoleCommands::Configured { scope } => {
            commands::listing::configured(&client, scope.branch, scope.product).await
        }
        ConsoleCommands::Modules(args) => commands::modules::show(&client, settings, args).await,
        ConsoleCommands::Apply(args) => commands::modules::apply(&client, settings, args).await,
        ConsoleCommands::Unconfigure {
            branch,
            product,
            module,
        } => commands::modules::unconfigure(&client, branch, product, module).await,
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`, which wins over settings.
fn init_tracing(verbose: u8, configured: &str) {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}
