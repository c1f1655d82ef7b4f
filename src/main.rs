// ABOUTME: CLI entry point for sqldef-runner
// ABOUTME: Parses commands and routes to appropriate handlers

use clap::{Args, Parser, Subcommand};
use sqldef_runner::commands;
use sqldef_runner::config::{Overrides, Settings};
use sqldef_runner::{ConnectionParams, Tool};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqldef-runner")]
#[command(about = "Download and run sqldef to export, preview, and apply database schemas", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory where sqldef binaries are cached (defaults to the current directory)
    #[arg(long, global = true)]
    bin_dir: Option<PathBuf>,
    /// Retry failed downloads this many times
    #[arg(long, global = true)]
    retries: Option<u32>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ConnectionArgs {
    /// sqldef flavour: mysqldef, psqldef, or sqlite3def
    #[arg(value_parser = parse_tool)]
    tool: Tool,
    #[arg(long)]
    host: String,
    #[arg(long)]
    port: Option<String>,
    #[arg(long)]
    user: String,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    database: String,
}

impl ConnectionArgs {
    fn params(&self) -> ConnectionParams {
        ConnectionParams {
            host: self.host.clone(),
            port: self.port.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the current schema of a database to a file
    Export {
        #[command(flatten)]
        connection: ConnectionArgs,
        /// Output schema file
        #[arg(long)]
        file: PathBuf,
    },
    /// Show the DDL needed to reach a schema file without running it
    DryRun {
        #[command(flatten)]
        connection: ConnectionArgs,
        /// Desired schema file
        #[arg(long)]
        file: PathBuf,
    },
    /// Migrate a database to a schema file
    Apply {
        #[command(flatten)]
        connection: ConnectionArgs,
        /// Desired schema file
        #[arg(long)]
        file: PathBuf,
        /// Skip the preview and confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Download a sqldef binary into the cache directory
    Install {
        #[arg(value_parser = parse_tool)]
        tool: Tool,
    },
}

fn parse_tool(value: &str) -> Result<Tool, String> {
    value.parse().map_err(|e: sqldef_runner::SqldefError| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - default to INFO level if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(
        Overrides {
            bin_dir: cli.bin_dir,
            retries: cli.retries,
        },
        cli.config.as_deref(),
    )?;
    tracing::debug!("Using settings: {:?}", settings);

    match cli.command {
        Commands::Export { connection, file } => {
            commands::export(&settings, connection.tool, &connection.params(), &file).await
        }
        Commands::DryRun { connection, file } => {
            commands::dry_run(&settings, connection.tool, &connection.params(), &file).await
        }
        Commands::Apply {
            connection,
            file,
            yes,
        } => {
            commands::apply(&settings, connection.tool, &connection.params(), &file, yes).await
        }
        Commands::Install { tool } => {
            let path = commands::install(&settings, tool).await?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
