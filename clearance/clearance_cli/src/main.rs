use anyhow::Result;
use clap::{Parser, Subcommand};
use clearance_runtime::{Runtime, RuntimeConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

/// Clearance Command Line Interface
///
/// Seeds an in-memory Clearance system from the configuration and runs one
/// command against it.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Path to a TOML or JSON configuration file
    #[clap(long, global = true)]
    config: Option<String>,

    /// Log at debug level unless RUST_LOG is set
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the label hierarchy, least sensitive first
    Labels(commands::OutputArgs),

    /// List the permission catalog
    Permissions(commands::OutputArgs),

    /// List roles and the permissions they grant
    Roles(commands::OutputArgs),

    /// List users and their roles
    Users(commands::OutputArgs),

    /// List the documents a user can read
    Documents(commands::documents::ListArgs),

    /// Show what a user may do with a document
    Check(commands::documents::DocumentArgs),

    /// Move a document one level down
    Downgrade(commands::documents::DocumentArgs),

    /// Move a document one level up
    Upgrade(commands::documents::DocumentArgs),
}

fn init_tracing(config: &RuntimeConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RuntimeConfig::load(cli.config.as_deref()).await?;
    init_tracing(&config, cli.verbose);

    let runtime = Runtime::with_config(config)?;
    let report = runtime.start()?;
    debug!("Seeded {:?}", report);

    match &cli.command {
        Commands::Labels(args) => commands::catalog::labels(&runtime, args),
        Commands::Permissions(args) => commands::catalog::permissions(&runtime, args),
        Commands::Roles(args) => commands::catalog::roles(&runtime, args),
        Commands::Users(args) => commands::catalog::users(&runtime, args),
        Commands::Documents(args) => commands::documents::list(&runtime, args),
        Commands::Check(args) => commands::documents::check(&runtime, args),
        Commands::Downgrade(args) => commands::documents::downgrade(&runtime, args),
        Commands::Upgrade(args) => commands::documents::upgrade(&runtime, args),
    }
}
