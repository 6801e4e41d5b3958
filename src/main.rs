use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use user_center::config::{self, ServerConfig};
use user_center::server;

#[derive(Parser)]
#[command(name = "user-center", author, version, about = "User center HTTP service")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "APP_CONFIG", default_value = "config.yml")]
    config: PathBuf,
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if server.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = config::load(&args.config)?;

    init_tracing(&config.server);
    config.print_summary();

    server::run(config).await
}
