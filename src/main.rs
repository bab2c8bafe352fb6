use std::sync::Arc;

use tower_http::cors::CorsLayer;

use tagmax_onboard::config::{GatewayConfig, ServerConfig};
use tagmax_onboard::gateway::IntegrationGateway;
use tagmax_onboard::session::{onboarding_routes, OnboardingRouteState, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let gateway_config = GatewayConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export TAGMAX_RECORD_ENDPOINT=https://...");
        eprintln!("  export TAGMAX_IMAGE_ENDPOINT=https://...");
        std::process::exit(1);
    });
    let server_config = ServerConfig::from_env();

    eprintln!("🛰  Tag Max onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api/onboarding", server_config.port);
    eprintln!("   Record endpoint: {}", gateway_config.record_endpoint);
    eprintln!("   Image endpoint: {}\n", gateway_config.image_endpoint);

    let gateway = Arc::new(IntegrationGateway::new(gateway_config));
    let store = Arc::new(SessionStore::new());

    // The browser UI lives on another origin during development.
    let app = onboarding_routes(OnboardingRouteState { store, gateway })
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", server_config.port)).await?;
    tracing::info!(port = server_config.port, "Onboarding API started");
    axum::serve(listener, app).await?;

    Ok(())
}
