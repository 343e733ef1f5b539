use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Clone)]
pub struct Config {
    /// SQLite connection string; the database file is created on first run.
    #[clap(env, long, default_value = "sqlite://restaurants.db")]
    pub database_url: String,

    #[clap(env, long, default_value = "0.0.0.0:8000")]
    pub bind_addr: String,

    /// ONNX image-classification model on local disk.
    #[clap(env, long, default_value = "model/mobilenetv2-7.onnx")]
    pub model_path: PathBuf,

    /// Plain-text class label list, one label per line.
    #[clap(
        env,
        long,
        default_value = "https://raw.githubusercontent.com/pytorch/hub/master/imagenet_classes.txt"
    )]
    pub labels_url: String,

    /// Comma-separated CORS allow-list.
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Start the HTTP API server. This is the default when no subcommand is
    /// given.
    Serve,
    /// Load the restaurant CSV dataset into the database and exit.
    Load {
        #[clap(env, long, default_value = "data/zomato.csv")]
        csv_path: PathBuf,
    },
}
