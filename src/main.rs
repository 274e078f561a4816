//! Fetch-a-Donut agent binary.
//!
//! Loads configuration, wires the adapters, and serves the chat surface.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fetch_a_donut::adapters::ai::{AsiOneConfig, AsiOneProvider};
use fetch_a_donut::adapters::http::chat::{chat_routes, AgentCard, ChatAppState};
use fetch_a_donut::adapters::storage::InMemorySessionStore;
use fetch_a_donut::application::{
    EngagementSettings, HandleChatMessageHandler, ResponseGenerator,
};
use fetch_a_donut::config::AppConfig;
use fetch_a_donut::ports::AIProvider;

const AGENT_DESCRIPTION: &str =
    "A fun donut coupon agent! Share a donut story and receive a free donut coupon code.";

const AGENT_README: &str = r#"# Fetch-a-Donut Agent

A fun, interactive agent that distributes donut coupons through story-based engagement.

## How It Works

1. Message the agent asking for a donut
2. Share your best donut story
3. Get a rated coupon code for a free donut!

## Features

- AI-powered story evaluation
- Unique coupon code generation
- One coupon per session (anti-abuse)
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    // Outbound provider; validate() has already required the API key
    let api_key = config.ai.api_key.clone().unwrap_or_default();
    let provider: Arc<dyn AIProvider> = Arc::new(AsiOneProvider::new(
        AsiOneConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    ));

    let generator = ResponseGenerator::new(provider, config.ai.max_tokens);
    let store = Arc::new(InMemorySessionStore::new());

    let settings = EngagementSettings {
        conference_id: config.event.conference_id.clone(),
        conference_name: config.event.conference_name.clone(),
        conference_start_date: config.event.conference_start_date.clone(),
        conference_end_date: config.event.conference_end_date.clone(),
        coupon_prefix: config.event.coupon_prefix.clone(),
        min_story_length: config.event.min_story_length,
        mode: config.event.mode,
    };

    let handler = HandleChatMessageHandler::new(store, generator, settings);

    let agent_card = AgentCard {
        name: config.event.agent_name.clone(),
        description: AGENT_DESCRIPTION.to_string(),
        readme: AGENT_README.to_string(),
    };

    let app = chat_routes()
        .with_state(ChatAppState::new(Arc::new(handler), agent_card))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Agent starting: {} at http://{}",
        config.event.agent_name, addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Donut agent shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}
