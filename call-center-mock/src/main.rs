use call_center_mock::{MockBackend, router_with};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Listen address, overridable through `CALL_CENTER_MOCK_ADDR`
const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "call_center_mock=info,tower_http=info".into()),
        )
        .with_target(false)
        .init();

    let addr = std::env::var("CALL_CENTER_MOCK_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let app = router_with(MockBackend::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Mock call center backend listening on http://{}", addr);
    axum::serve(listener, app).await
}
