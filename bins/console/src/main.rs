//! Phet console
//!
//! Main entry point for the interactive expense tracker.

mod command;
mod session;

use std::io;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phet_app::Tracker;
use phet_shared::AppConfig;
use phet_shared::config::StorageBackend;
use phet_store::{FileStorage, KeyValueStorage, MemoryStorage};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr so it never mixes with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::load()?;

    let storage: Arc<dyn KeyValueStorage> = match config.storage.backend {
        StorageBackend::File => {
            let storage = FileStorage::open(&config.storage.path)?;
            info!(path = %storage.root().display(), "Using file storage");
            Arc::new(storage)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage, nothing will be saved");
            Arc::new(MemoryStorage::new())
        }
    };

    let tracker = Tracker::new(storage, &config);
    session::run(&tracker, io::stdin().lock(), io::stdout().lock())
}
