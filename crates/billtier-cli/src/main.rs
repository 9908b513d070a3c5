use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use billtier_core::app::TieringBuilder;
use billtier_core::config::TieringConfig;
use billtier_core::domain::RecordId;
use billtier_core::impls::{FsColdStore, FsPrimaryStore};

/// Exit status when a record is absent from both tiers.
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "billtier",
    about = "Archive and retrieve billing records across hot and cold storage"
)]
struct Cli {
    /// TOML configuration file; `BILLTIER__*` environment variables override it.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Move records older than the retention window to cold storage.
    Archive,

    /// Print a record, looking in hot storage first and cold storage second.
    Get {
        /// Record identifier.
        id: String,
    },
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = TieringConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.log_level);

    // (A) ストアを用意（ローカルディレクトリ）
    let tiering = TieringBuilder::from_config(&config)
        .primary(Arc::new(FsPrimaryStore::new(&config.hot_dir)))
        .cold(Arc::new(FsColdStore::new(&config.cold_dir)))
        .build()?;

    // (B) 1 回の起動で 1 操作だけ実行
    match cli.command {
        Command::Archive => {
            let report = tiering.archiver.run().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Get { id } => {
            let lookup = tiering
                .retriever
                .get(&RecordId::new(id))
                .await
                .context("retrieving record")?;
            println!("{}", serde_json::to_string_pretty(&lookup.to_json()?)?);
            if lookup.is_not_found() {
                Ok(ExitCode::from(EXIT_NOT_FOUND))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
