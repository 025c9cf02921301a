//! Server entry point

use clap::Parser;
use trendpop_lib::config::ServerConfig;
use trendpop_lib::server::{run_server, ServerAppState};

/// TrendPop storefront generation server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Address to bind to
    #[arg(long, env = "BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Allowed CORS origins (repeatable); defaults to permissive
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = ServerAppState::new(config);

    let cors_origins = if args.cors_origins.is_empty() {
        None
    } else {
        Some(args.cors_origins)
    };

    if let Err(e) = run_server(args.port, &args.bind, state, cors_origins).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
