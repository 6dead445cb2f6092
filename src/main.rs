use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use hotel_booking::config::AppConfig;
use hotel_booking::db;
use hotel_booking::handlers;
use hotel_booking::services::conversation::ConversationHost;
use hotel_booking::services::dialogue::BookingDialogue;
use hotel_booking::services::relay::{HttpRuntime, LocalRuntime, RuntimeClient};
use hotel_booking::state::AppState;

const EXPIRY_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        config.conversation_ttl_minutes > 0,
        "CONVERSATION_TTL_MINUTES must be positive"
    );

    let conn = db::init_db(&config.database_url)?;

    let conversations = Arc::new(ConversationHost::new(
        Arc::new(Mutex::new(conn)),
        BookingDialogue::new(config.dialogue()),
        config.conversation_ttl_minutes,
    ));

    let runtime: Box<dyn RuntimeClient> = match &config.runtime_url {
        Some(url) => {
            tracing::info!("relaying to external conversation runtime (url: {url})");
            Box::new(HttpRuntime::new(url.clone()))
        }
        None => {
            tracing::info!(
                default_year = config.default_year,
                "running booking dialogue in-process"
            );
            Box::new(LocalRuntime::new(Arc::clone(&conversations)))
        }
    };

    let sweeper = Arc::clone(&conversations);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(EXPIRY_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            match sweeper.expire_idle() {
                Ok(0) => {}
                Ok(count) => tracing::info!(count, "expired idle conversations"),
                Err(e) => tracing::error!(error = %e, "failed to expire conversations"),
            }
        }
    });

    let state = Arc::new(AppState {
        conversations,
        runtime,
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
