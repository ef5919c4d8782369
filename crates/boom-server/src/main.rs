//! Boom deployment report server
//!
//! Serves the report endpoint used by the boom deployment calculator.

mod routes;

use anyhow::Context;
use boom_core::{clients::HttpTransport, BoomConfig, ReportHandler, ReqwestTransport};
use clap::{Arg, Command};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with INFO as default if RUST_LOG not set
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let matches = Command::new("boom-server")
        .version("1.0.0")
        .about("Boom deployment report service")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Credentials JSON file; secrets are read from the environment when omitted")
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_name("PORT")
                .help("HTTP port (overrides the config file)")
                .value_parser(clap::value_parser!(u16))
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Bind address (overrides the config file)")
        )
        .get_matches();

    // Load configuration
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            let config = BoomConfig::from_file(path)?;
            log::info!("Loaded configuration from {}", path);
            config
        }
        None => {
            log::info!("Loading secrets from environment");
            BoomConfig::from_env()
        }
    };

    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }
    if let Some(bind) = matches.get_one::<String>("bind") {
        config.server.bind = bind.clone();
    }

    // Missing secrets do not stop the server; each request reports them instead
    let missing = config.missing_secrets();
    if !missing.is_empty() {
        log::warn!("Missing secrets: {}. Report requests will fail until they are set.", missing.join(", "));
    }

    let transport: Arc<dyn HttpTransport> = Arc::new(
        ReqwestTransport::new().context("Failed to create HTTP client")?
    );
    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let handler = Arc::new(ReportHandler::from_config(config, transport));

    log::info!("Initialized report handler");

    let app = routes::router(handler);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("Listening on {} ({})", listener.local_addr()?, routes::REPORT_PATH);

    axum::serve(listener, app).await?;

    Ok(())
}
