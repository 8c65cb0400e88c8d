pub mod api;
pub mod blog;
pub mod config;
pub mod content;
pub mod error;
pub mod gist;
pub mod render;
pub mod state;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use state::AppState;

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("GISTBLOG_LOG"))
        .init();

    let config = Config::from_env();

    let app = match AppState::new(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(%e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = api::run_server(app, &config.listen).await {
        tracing::error!(%e, "server exited");
        std::process::exit(1);
    }
}
