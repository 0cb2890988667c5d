mod server;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use arena_api::{create_router, AppState};
use arena_core::{
    bootstrap::init_services,
    config::discover_config_path,
    logging, Config,
};

#[derive(Debug, Parser)]
#[command(
    name = "arena",
    version,
    about = "Single-broadcaster live room: join tokens and broadcast takeover for LiveKit",
    long_about = None
)]
struct Args {
    /// Config file (defaults to $ARENA_CONFIG_PATH, then ./config.yaml)
    #[arg(short, long)]
    config: Option<String>,
    /// Bind host
    #[arg(long, env = "HOST")]
    host: Option<String>,
    /// HTTP port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

fn load_config(args: &Args) -> Result<Config> {
    let path = discover_config_path(args.config.as_deref());
    if let Some(path) = &path {
        eprintln!("Loading config from {path}");
    }

    let mut config = Config::load(path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.http_port = port;
    }

    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load configuration
    let config = load_config(&args)?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("Arena server starting...");
    info!("Room: {}", config.room.name);

    // 3. Initialize services
    let services = init_services(&config)?;

    // 4. Serve
    let address = config.http_address();
    let router = create_router(AppState::new(Arc::new(config), services));
    server::serve(&address, router).await?;

    info!("Arena server stopped");
    Ok(())
}
