// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `frontdesk serve`: wires the adapters into the gateway and runs the
//! HTTP server until a shutdown signal arrives.

use std::sync::Arc;

use frontdesk_composio::ComposioCatalog;
use frontdesk_config::FrontdeskConfig;
use frontdesk_core::{FrontdeskError, HealthStatus, PluginAdapter, StorageAdapter};
use frontdesk_gateway::{Adapters, AppState};
use frontdesk_openai::OpenAiProvider;
use frontdesk_storage::SqliteStorage;
use frontdesk_stripe::StripePayments;
use tracing::{info, warn};

use crate::shutdown;

/// Builds every adapter from config and logs its health. Storage is
/// initialized (migrations run); services without credentials come up
/// degraded rather than failing.
async fn build_adapters(
    config: &FrontdeskConfig,
) -> Result<(Adapters, Arc<SqliteStorage>), FrontdeskError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let provider = Arc::new(OpenAiProvider::new(&config.openai)?);
    let payments = Arc::new(StripePayments::new(&config.stripe)?);
    let catalog = Arc::new(ComposioCatalog::new(&config.composio)?);
    let mailer = frontdesk_email::build_mailer(&config.email)?;

    log_health(storage.as_ref()).await;
    log_health(provider.as_ref()).await;
    log_health(payments.as_ref()).await;
    log_health(catalog.as_ref()).await;

    let adapters = Adapters {
        storage: storage.clone(),
        provider,
        mailer,
        payments,
        catalog,
    };
    Ok((adapters, storage))
}

async fn log_health(adapter: &dyn PluginAdapter) {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => {
            info!(adapter = adapter.name(), "adapter healthy");
        }
        Ok(HealthStatus::Degraded(reason)) => {
            warn!(adapter = adapter.name(), reason = %reason, "adapter degraded");
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            warn!(adapter = adapter.name(), reason = %reason, "adapter unhealthy");
        }
        Err(e) => {
            warn!(adapter = adapter.name(), error = %e, "adapter health check failed");
        }
    }
}

pub async fn run_serve(config: FrontdeskConfig) -> Result<(), FrontdeskError> {
    init_tracing(&config.server.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "frontdesk starting");

    let (adapters, storage) = build_adapters(&config).await?;
    if config.admin.bearer_token.is_none() {
        warn!("admin.bearer_token is not set; the admin API will reject every request");
    }

    let system_prompt = frontdesk_chat::load_system_prompt(&config.chat).await;
    let state = AppState::new(&config, system_prompt, adapters);
    let app = frontdesk_gateway::router(state, &config.server);

    let listener = frontdesk_gateway::bind(&config.server).await?;
    let cancel = shutdown::install_signal_handler();
    let served = frontdesk_gateway::serve(listener, app, cancel).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "failed to checkpoint database on shutdown");
    }
    served?;

    info!("frontdesk shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("frontdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
