use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use tracing::info;

use cronbi_api::{AppState, AppStateInner};
use cronbi_api::sessions::{AdminCredentials, MemorySessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cronbi=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("CRONBI_DB_PATH").unwrap_or_else(|_| "cronbi.db".into());
    let host = std::env::var("CRONBI_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("CRONBI_PORT")
        .unwrap_or_else(|_| "3001".into())
        .parse()?;
    let admin_username =
        std::env::var("CRONBI_ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
    let admin_password =
        std::env::var("CRONBI_ADMIN_PASSWORD").unwrap_or_else(|_| "cronbi2024".into());
    let client_url =
        std::env::var("CRONBI_CLIENT_URL").unwrap_or_else(|_| "http://localhost:5173".into());
    let client_origin: HeaderValue = client_url.parse()?;

    // Init database
    let db = cronbi_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state — credentials and session store injected at startup
    let state: AppState = Arc::new(AppStateInner {
        db,
        credentials: Box::new(AdminCredentials::new(admin_username, admin_password)),
        sessions: Box::new(MemorySessionStore::new()),
    });

    let app = cronbi_api::app(state, client_origin);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Cronbi server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
