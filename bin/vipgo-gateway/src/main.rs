//! VIP Go Gateway
//!
//! Serves the machine-token protected REST endpoints, or mints a token for
//! a namespace so a trusted caller can be provisioned.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vipgo_auth::{MachineSecret, MachineTokenVerifier, Namespace};
use vipgo_common::Config;
use vipgo_gateway::{AppState, build_router};

#[derive(Parser, Debug)]
#[command(name = "vipgo-gateway")]
#[command(about = "VIP Go REST gateway")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "/etc/vipgo/gateway.toml", global = true)]
    config: String,

    /// Shared secret for machine tokens (overrides auth.secret)
    #[arg(long, env = "VIPGO_MACHINE_SECRET", hide_env_values = true, global = true)]
    secret: Option<String>,

    /// Log level (overrides logging.level)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API (default)
    Serve {
        /// Listen address (overrides server.listen)
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },
    /// Print the machine token for a namespace
    Token {
        /// Namespace, e.g. vip/v1
        namespace: String,
    },
}

fn load_secret(args: &Args, config: &Config) -> Result<MachineSecret> {
    let secret = args
        .secret
        .clone()
        .or_else(|| config.auth.secret.clone())
        .context("no machine secret: set VIPGO_MACHINE_SECRET or auth.secret")?;
    Ok(MachineSecret::new(secret)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config file {}", args.config))?;
    config.validate()?;

    let verifier = Arc::new(MachineTokenVerifier::from_secret(load_secret(&args, &config)?));

    match &args.command {
        Some(Command::Token { namespace }) => {
            let namespace = Namespace::new(namespace.as_str())?;
            println!("{}", verifier.codec().generate(&namespace));
            Ok(())
        }
        Some(Command::Serve { listen }) => serve(&args, config, verifier, *listen).await,
        None => serve(&args, config, verifier, None).await,
    }
}

async fn serve(
    args: &Args,
    config: Config,
    verifier: Arc<MachineTokenVerifier>,
    listen: Option<SocketAddr>,
) -> Result<()> {
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let listen = listen.unwrap_or(config.server.listen);

    info!("Starting VIP Go Gateway");
    info!("Config file: {}", args.config);
    info!("Sites configured: {}", config.sites.len());

    let state = Arc::new(AppState {
        sites: config.sites,
    });
    let app = build_router(state, verifier)?;

    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {listen}"))?;
    info!("Listening on {}", listen);

    axum::serve(listener, app).await?;
    Ok(())
}
