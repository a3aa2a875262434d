use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use calendar_api::config::{Config, StoreBackend};
use calendar_api::routes::create_routes;
use calendar_api::shutdown::shutdown_signal;
use calendar_api::state::AppState;
use calendar_api::store::{InMemoryEventStore, MongoEventStore};

const DEFAULT_LOG_FILTER: &str = "calendar_api=info,tower_http=info";

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let (state, mongo) = match config.backend {
        StoreBackend::Mongo => {
            let store = Arc::new(
                MongoEventStore::connect(&config.store)
                    .await
                    .expect("Failed to create MongoDB client"),
            );
            (AppState::new(store.clone()), Some(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory event store; events are lost on exit");
            (AppState::new(Arc::new(InMemoryEventStore::new())), None)
        }
    };

    let app = create_routes(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");

    if let Some(store) = mongo {
        store.shutdown().await;
    }
}
