use anyhow::Result;
use delfina_home::{config, web};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("delfina_home=info".parse()?),
        )
        .init();

    info!("Starting Delfina Home");

    // Load configuration from environment
    let config = config::Config::from_env()?;
    let addr = format!("0.0.0.0:{}", config.port);

    let state = web::AppState::new(config);
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
