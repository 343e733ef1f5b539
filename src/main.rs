use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::classifier::ImageClassifier;
use crate::config::{Command, Config};
use crate::controller::AppState;
use crate::repositories::restaurant_repo::RestaurantRepo;

mod classifier;
mod config;
mod controller;
mod helpers;
mod loader;
mod models;
mod repositories;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("Invalid database URL: {}", config.database_url))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .context("Failed to open the SQLite database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    match config.command {
        Some(Command::Load { ref csv_path }) => {
            let repo = RestaurantRepo::new(pool);
            let loaded = loader::load_csv(&repo, csv_path).await?;
            info!("Dataset load finished, {} restaurants in place", loaded);
            Ok(())
        }
        Some(Command::Serve) | None => {
            let classifier = ImageClassifier::load(&config.model_path)
                .context("Failed to load the image classification model")?;
            let labels = classifier::fetch_labels(&config.labels_url).await?;

            let app_state = AppState {
                pool,
                classifier: Arc::new(classifier),
                labels: Arc::new(labels),
            };
            controller::serve(app_state, &config).await
        }
    }
}
