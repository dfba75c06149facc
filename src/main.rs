use anyhow::Result;
use visitor_counter::{create_handler, init_tracing, run_lambda, serve_local, AppConfig, RuntimeMode};

#[tokio::main]
async fn main() -> Result<()> {
    // Local runs may keep their settings in a .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env()?;
    let handler = create_handler(&config).await?;

    match config.runtime {
        RuntimeMode::Lambda => run_lambda(handler).await,
        RuntimeMode::Local { bind_addr } => serve_local(handler, &bind_addr).await,
    }
}
