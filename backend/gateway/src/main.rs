use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use evidex_blobstore::BlobStoreClient;
use evidex_config::AppConfig;
use evidex_docint::{DocIntClient, DocIntCredential};
use evidex_extractor::ExtractionHandler;
use evidex_gateway::{start_server, GatewayState};

#[tokio::main]
async fn main() -> Result<()> {
    let log_dir = std::env::var("EVIDEX_LOG_DIR").ok().map(PathBuf::from);
    logging::init_logger(log_dir.as_deref(), "info");

    // Fail fast: a misconfigured host never starts accepting invocations.
    let config = AppConfig::from_env().context("loading configuration")?;
    info!("Configuration loaded: {}", config.redacted_summary());

    let credential = match &config.docint_key {
        Some(key) => DocIntCredential::Key(key.clone()),
        None => DocIntCredential::ManagedIdentity,
    };
    let analyzer = Arc::new(DocIntClient::new(&config.docint_endpoint, credential));
    let store = Arc::new(
        BlobStoreClient::new(&config.storage_connection, &config.evidence_container)
            .context("parsing storage connection string")?,
    );
    let handler = Arc::new(ExtractionHandler::new(analyzer, store));

    let port = std::env::var("FUNCTIONS_CUSTOMHANDLER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    start_server(addr, GatewayState { handler }).await
}
