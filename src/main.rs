use std::{net::TcpListener, sync::Arc};

use actix_web::web;
use anyhow::Context;
use zeroize::Zeroize;

use portfolio_api::{
    graceful_shutdown::stop_on_signal,
    settings::AppConfig,
    shared_repos::SharedRepositories,
    startup::run,
    storage::local::LocalImageStore,
    telemetry::init_tracing,
    AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let mut config = AppConfig::new().context("Configuration error")?;
    init_tracing(config.log_format);
    tracing::info!("Loaded configuration: {:?}", config);

    let repos = SharedRepositories::from_config(&config)
        .await
        .context("Failed to open storage backend")?;

    let image_store = LocalImageStore::new(&config.upload_dir, &config.public_base_url)
        .with_context(|| format!("Failed to prepare upload directory {}", config.upload_dir))?;

    let app_state = web::Data::new(
        AppState::new(&config, repos, Arc::new(image_store))
            .context("Failed to prepare admin credentials")?
    );
    config.admin_password.zeroize();

    let server_addr = config.server_addr();
    let listener = TcpListener::bind(&server_addr)
        .with_context(|| format!("Failed to bind {}", server_addr))?;

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = run(listener, app_state, &config)?;
    tokio::spawn(stop_on_signal(server.handle()));
    server.await?;

    Ok(())
}
