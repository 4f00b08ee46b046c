// src/main.rs

use dotenvy::dotenv;
use sqlquiz::config::Config;
use sqlquiz::routes;
use sqlquiz::services::seed;
use sqlquiz::state::AppState;
use sqlquiz::store;
use sqlx::SqlitePool;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match store::connect(&config.database_url).await {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to open database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    tracing::info!("Running migrations...");
    store::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    if let Some(path) = &config.seed_file {
        if let Err(e) = seed_question_bank(&pool, path).await {
            tracing::error!("Failed to seed questions from {}: {}", path, e);
        }
    }

    let state = AppState {
        pool,
        config: config.clone(),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listening address");
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}

async fn seed_question_bank(pool: &SqlitePool, path: &str) -> Result<(), sqlquiz::error::AppError> {
    let bank = seed::load_question_bank(path).await?;
    seed::seed_questions(pool, &bank).await?;
    Ok(())
}
