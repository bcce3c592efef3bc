// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router, shared state, and the HTTP server loop.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use frontdesk_chat::{AdminService, AttentionPolicy, ChatService};
use frontdesk_config::model::{FrontdeskConfig, ServerConfig};
use frontdesk_core::traits::{
    CatalogAdapter, MailerAdapter, PaymentAdapter, ProviderAdapter, StorageAdapter,
};
use frontdesk_core::FrontdeskError;
use frontdesk_leads::{LeadService, VoiceService};
use http::{HeaderValue, Method, header};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Process start time for the health endpoint.
#[derive(Clone)]
pub struct HealthState {
    pub start_time: Instant,
}

/// Redirect targets and price table for checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub prices: BTreeMap<String, String>,
    pub frontend_url: Option<String>,
    pub public_url: String,
}

/// The upstream adapters the services are built from.
pub struct Adapters {
    pub storage: Arc<dyn StorageAdapter>,
    pub provider: Arc<dyn ProviderAdapter>,
    pub mailer: Arc<dyn MailerAdapter>,
    pub payments: Arc<dyn PaymentAdapter>,
    pub catalog: Arc<dyn CatalogAdapter>,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub admin: Arc<AdminService>,
    pub leads: Arc<LeadService>,
    pub voice: Arc<VoiceService>,
    pub payments: Arc<dyn PaymentAdapter>,
    pub catalog: Arc<dyn CatalogAdapter>,
    pub checkout: Arc<CheckoutSettings>,
    pub auth: AuthConfig,
    pub health: HealthState,
}

impl AppState {
    pub fn new(config: &FrontdeskConfig, system_prompt: String, adapters: Adapters) -> Self {
        let Adapters {
            storage,
            provider,
            mailer,
            payments,
            catalog,
        } = adapters;

        Self {
            chat: Arc::new(ChatService::new(
                config,
                system_prompt,
                storage.clone(),
                provider,
                mailer.clone(),
            )),
            admin: Arc::new(AdminService::new(
                storage.clone(),
                AttentionPolicy::from_config(&config.chat),
            )),
            leads: Arc::new(LeadService::new(config, storage.clone(), mailer)),
            voice: Arc::new(VoiceService::new(&config.voice, storage)),
            payments,
            catalog,
            checkout: Arc::new(CheckoutSettings {
                prices: config.stripe.prices.clone(),
                frontend_url: config.server.frontend_url.clone(),
                public_url: config.server.public_url.clone(),
            }),
            auth: AuthConfig {
                bearer_token: config.admin.bearer_token.clone(),
            },
            health: HealthState {
                start_time: Instant::now(),
            },
        }
    }
}

/// CORS for the configured origins plus `frontend_url`.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .chain(config.frontend_url.iter())
        .map(|o| o.trim_end_matches('/'))
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// All API routes, served both at the root and under `/api`.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let public_routes = Router::new()
        .route("/chat/message", post(handlers::chat::post_message))
        .route(
            "/chat/conversation/{id}",
            get(handlers::chat::get_conversation),
        )
        .route("/waitlist", post(handlers::leads::post_waitlist))
        .route("/newsletter", post(handlers::leads::post_newsletter))
        .route("/book-demo", post(handlers::leads::post_book_demo))
        .route("/waitlist-count", get(handlers::leads::get_waitlist_count))
        .route("/start-voice-call", post(handlers::leads::post_voice_call))
        .route(
            "/create-checkout-session",
            post(handlers::commerce::post_checkout_session),
        )
        .route(
            "/integrations-search",
            get(handlers::commerce::get_integrations),
        )
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/admin/chats", get(handlers::admin::list_chats))
        .route(
            "/admin/chat/{id}",
            get(handlers::admin::get_chat).post(handlers::admin::post_chat_action),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    let routes = public_routes.merge(admin_routes);

    Router::new()
        .nest("/api", routes.clone())
        .merge(routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

/// Serves `app` until `shutdown` is cancelled, then lets in-flight requests finish.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), FrontdeskError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("HTTP server listening on {addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| FrontdeskError::Internal(format!("HTTP server error: {e}")))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Binds `host:port`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, FrontdeskError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| FrontdeskError::Internal(format!("failed to bind {addr}: {e}")))
}
