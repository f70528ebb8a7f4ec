use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use fyyur_server::config::{create_security_headers_layer, Config};
use fyyur_server::db::{postgres, PgStore};
use fyyur_server::routes::create_routes;
use fyyur_server::state::AppState;
use fyyur_server::views::Views;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let pool = postgres::connect(&config.database_url, config.max_connections)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database and applied migrations");

    let views = Views::new().expect("Failed to compile templates");
    let state = AppState::new(Arc::new(PgStore::new(pool)), views);
    let app = create_routes(state, create_security_headers_layer(&config));

    tracing::info!("Server running at http://{}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
