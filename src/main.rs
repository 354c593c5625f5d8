use notifold::config::Config;
use notifold::infrastructure::http::middleware::AppState;
use notifold::infrastructure::http::router::build_router;
use notifold::infrastructure::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    let _guard = observability::init(&config)?;
    tracing::info!(
        "Configuration loaded (max batch {}, single actor policy {})",
        config.max_batch_size,
        config.single_actor_policy.as_str()
    );

    let addr = config.server_address();
    let app = build_router(AppState::new(config));

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
