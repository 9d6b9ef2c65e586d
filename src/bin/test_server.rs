// Standalone replica server for running suites by hand:
//   cargo run --features test-server --bin test-server -- 3000

use std::net::SocketAddr;
use tracing::info;

// Include the shared test server module
include!("../../tests/test_server_app.rs");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pagewright::logging::init();

    let app = create_app().await;

    // Parse port from args or use default
    let port: u16 = std::env::args()
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Test server listening on http://{}", addr);
    info!(
        "Valid login: {} / {}",
        VALID_EMAIL, VALID_PASSWORD
    );

    axum::serve(listener, app).await?;
    Ok(())
}
