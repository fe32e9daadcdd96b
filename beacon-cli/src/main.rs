use anyhow::{Context, Result};
use beacon_core::{ServerConfig, ServerOptions, TlsConfig};
use beacon_server::{serve, NullRelay, PRESENCE_ROUTE};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "beacon", version, about = "Room based presence server for peer-to-peer signaling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the presence server.
    Serve(ServerArgs),

    /// Print the effective configuration as JSON and exit.
    Config(ServerArgs),
}

#[derive(clap::Args)]
struct ServerArgs {
    /// JSON file with server options. Flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    port: Option<u16>,

    #[arg(long)]
    host: Option<String>,

    /// Mount prefix for the presence route and the relay.
    #[arg(long)]
    path: Option<String>,

    /// Relay API key.
    #[arg(long)]
    key: Option<String>,

    /// Running behind a reverse proxy (overrides the config file).
    #[arg(long, value_name = "true|false")]
    proxied: Option<bool>,

    #[arg(long, requires = "ssl_cert")]
    ssl_key: Option<PathBuf>,

    #[arg(long, requires = "ssl_key")]
    ssl_cert: Option<PathBuf>,

    /// Allowed CORS origin. Repeat for several; none allows any origin.
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,
}

impl ServerArgs {
    fn into_config(self) -> Result<ServerConfig> {
        let file = match &self.config {
            Some(path) => ServerOptions::from_file(path)?,
            None => ServerOptions::default(),
        };

        let ssl = match (self.ssl_key, self.ssl_cert) {
            (Some(key), Some(cert)) => Some(TlsConfig::new(key, cert)),
            _ => None,
        };

        let flags = ServerOptions {
            port: self.port,
            host: self.host,
            path: self.path,
            key: self.key,
            proxied: self.proxied,
            ssl,
            cors_origins: (!self.cors_origins.is_empty()).then_some(self.cors_origins),
            relay: None,
        };

        Ok(ServerConfig::default().merged(file.overlay(flags)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Commands::Config(args) => {
            let config = args.into_config()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Commands::Serve(args) => {
            let config = args.into_config()?;
            let route = format!("{}{}", config.mount_path().unwrap_or_default(), PRESENCE_ROUTE);

            println!("{}", "📡 Starting Beacon...".green().bold());
            info!(
                "Effective config: {}:{} path '{}' proxied={} cors_origins={:?}",
                config.host, config.port, config.path, config.proxied, config.cors_origins
            );
            info!("No relay service configured, serving presence only");

            serve(config, Arc::new(NullRelay), move |socket| {
                let scheme = if socket.is_tls() { "wss" } else { "ws" };
                println!(
                    "   🔌 Presence: {}://{}{}",
                    scheme,
                    socket.local_addr(),
                    route
                );
            })
            .await
            .context("Presence server stopped")?;
        }
    }

    Ok(())
}
