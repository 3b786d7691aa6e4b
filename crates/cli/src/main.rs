//! Honest Shops CLI - Database migrations and directory management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! honest-shops-cli migrate
//!
//! # Seed states, addresses and shops from a YAML file
//! honest-shops-cli seed --file directory.yaml
//!
//! # Print the directory as JSON
//! honest-shops-cli list
//! ```
//!
//! Every command reads `DIRECTORY_DATABASE_URL` (fallback `DATABASE_URL`,
//! default `sqlite://database.db`) unless `--database-url` is given.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "honest-shops-cli")]
#[command(author, version, about = "Honest Shops directory tools")]
struct Cli {
    /// Database URL (overrides `DIRECTORY_DATABASE_URL`)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the directory from a YAML file
    Seed {
        /// Path to the YAML seed file
        #[arg(short, long)]
        file: String,
    },
    /// Print the directory as pretty JSON
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = commands::database_url(cli.database_url);

    match cli.command {
        Commands::Migrate => commands::migrate::run(&database_url).await?,
        Commands::Seed { file } => commands::seed::run(&database_url, &file).await?,
        Commands::List => commands::list::run(&database_url).await?,
    }
    Ok(())
}
