//! Spreadsheet bulk loader (ztr-import)
//!
//! Loads student results from a spreadsheet into the hosted students table.
//!
//! **Usage:**
//! ```bash
//! ztr-import students.xlsx [--batch-size 50] [--dry-run] [--config config.toml]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use ztr_common::config::TomlConfig;
use ztr_common::store::PostgrestStore;
use ztr_import::batch::{BatchInserter, DEFAULT_BATCH_SIZE};
use ztr_import::{import_rows, reader};

/// Spreadsheet bulk loader
#[derive(Parser, Debug)]
#[command(name = "ztr-import")]
#[command(about = "Load student results from a spreadsheet into the students table")]
#[command(version)]
struct Args {
    /// Spreadsheet to load (first worksheet is used)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Records per insert request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Normalize and report without inserting anything
    #[arg(long)]
    dry_run: bool,

    /// Store base URL (overrides ZTR_STORE_URL and config.toml)
    #[arg(long)]
    store_url: Option<String>,

    /// Store access key (overrides ZTR_STORE_KEY and config.toml)
    #[arg(long)]
    store_key: Option<String>,

    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let rows = reader::read_first_sheet(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("Found {} records in {}", rows.len(), args.file.display());

    let summary = if args.dry_run {
        import_rows(&rows, None).await
    } else {
        let config =
            TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
        let store_config = config
            .resolve_store(args.store_url.as_deref(), args.store_key.as_deref())
            .context("Failed to resolve store credentials")?;

        info!("Student store: {}", store_config.url);

        let store = PostgrestStore::new(&store_config.url, &store_config.api_key)
            .context("Failed to create store client")?;
        let inserter = BatchInserter::new(Arc::new(store), args.batch_size);

        import_rows(&rows, Some(&inserter)).await
    };

    println!("\n{}", summary);

    Ok(())
}
