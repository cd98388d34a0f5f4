//! # tienda: Storefront Cart CLI
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing (stderr, RUST_LOG)                               │
//! │  2. Parse arguments                                                     │
//! │  3. Load AppConfig (defaults → tienda.toml → TIENDA_* env)              │
//! │  4. Open the storage backend and load the saved cart                    │
//! │  5. Run the command, print its rendering to stdout                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A corrupt or unreadable saved cart is logged and the session starts empty;
//! it is overwritten by the next successful add, remove or clear.

mod commands;
mod config;
mod render;

use anyhow::Context;
use tienda_store::{
    CartStore, FileStorage, MemoryStorage, SqliteStorage, Storage, StorageBackend, StorageConfig,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::{CommandLine, Storefront};
use config::AppConfig;
use render::Renderer;

const SQLITE_FILE_NAME: &str = "tienda.db";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = CommandLine::parse_args();
    let config = AppConfig::load(cli.config).context("Failed to load configuration")?;
    debug!(?config, "Configuration loaded");

    let policy = config.grouping_policy()?;
    let storage = open_storage(&config)?;

    let mut store = CartStore::with_key(storage, config.storage.key.clone()).with_policy(policy);
    store.load();

    let mut shop = Storefront {
        store,
        catalog: config.load_catalog()?,
        renderer: Renderer::new(policy, config.display.currency_symbol.clone()),
        policy,
        shipping: config.shipping_cost(),
    };

    let output = shop.run(cli.command)?;
    print!("{}", output);
    Ok(())
}

/// Opens the configured backend.
fn open_storage(config: &AppConfig) -> anyhow::Result<Box<dyn Storage>> {
    let backend = config.storage.backend;
    let data_dir = config.data_dir();
    info!(%backend, dir = %data_dir.display(), "Opening storage");

    let storage: Box<dyn Storage> = match backend {
        StorageBackend::Memory => Box::new(MemoryStorage::new()),
        StorageBackend::File => Box::new(
            FileStorage::open(&data_dir)
                .with_context(|| format!("Cannot open data dir {}", data_dir.display()))?,
        ),
        StorageBackend::Sqlite => {
            let path = data_dir.join(SQLITE_FILE_NAME);
            Box::new(
                SqliteStorage::open(StorageConfig::new(&path))
                    .with_context(|| format!("Cannot open database {}", path.display()))?,
            )
        }
    };
    Ok(storage)
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: `warn,tienda=info,sqlx=warn`
/// - `RUST_LOG=debug` for everything
///
/// Logs go to stderr so rendered views on stdout stay clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tienda=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
