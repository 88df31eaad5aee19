mod config;
mod extract_cmd;
mod status_cmd;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use somark_config::SomarkConfig;
use somark_core::OutputFormat;
use somark_gateway::{start_server, GatewayState};
use somark_plugins::SomarkSyncPlugin;

#[derive(Parser)]
#[command(name = "somark")]
#[command(about = "SoMark document extraction: PDF and images to markdown and JSON")]
#[command(version)]
struct Cli {
    /// Path to config.yaml (defaults to ~/.somark/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level filter; RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a document and print the result as JSON
    Extract {
        /// Path to the document (PDF, PNG, JPG)
        file: PathBuf,
        /// Output format: markdown, json or both
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
    /// Show plugin status
    Status,
    /// Print the effective config with secrets masked
    Config,
    /// Start the gateway HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind to
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref()).await?;

    let level = cli.log_level.as_deref().unwrap_or_else(|| config.log_level());
    let _log_guard = somark_logging::init_logger(config.log_dir().map(Path::new), level)?;
    debug!(config = %somark_config::redacted_config(&config), "Effective config");

    match cli.command {
        Commands::Extract { file, format } => {
            let plugin = SomarkSyncPlugin::load(config.plugin_config()).await?;
            extract_cmd::run(&plugin, file, format).await?;
        }
        Commands::Status => {
            let plugin = SomarkSyncPlugin::load(config.plugin_config()).await?;
            status_cmd::run(&plugin)?;
        }
        Commands::Config => {
            println!("{}", config::render_redacted(&config)?);
        }
        Commands::Serve { port, bind } => {
            run_server(&config, bind, port).await?;
        }
    }

    Ok(())
}

async fn run_server(config: &SomarkConfig, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.gateway_bind().to_string());
    let port = port.unwrap_or_else(|| config.gateway_port());
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("invalid gateway address {bind}:{port}"))?;

    info!(addr = %addr, "Starting SoMark gateway");

    let plugin = Arc::new(SomarkSyncPlugin::load(config.plugin_config()).await?);
    let state = GatewayState::new(Arc::clone(&plugin));

    start_server(addr, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Shutdown signal received");
    })
    .await?;

    // Handlers hold clones of the state until the server drains.
    match Arc::try_unwrap(plugin) {
        Ok(mut plugin) => {
            plugin.unload().await;
        }
        Err(_) => warn!("Plugin still referenced after shutdown; skipping unload"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_extract(args: &[&str]) -> (PathBuf, Option<OutputFormat>) {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Extract { file, format } => (file, format),
            _ => panic!("expected extract subcommand"),
        }
    }

    #[test]
    fn extract_accepts_short_and_long_format() {
        let (file, format) = parse_extract(&["somark", "extract", "a.pdf", "-f", "json"]);
        assert_eq!(file, PathBuf::from("a.pdf"));
        assert_eq!(format, Some(OutputFormat::Json));

        let (_, format) = parse_extract(&["somark", "extract", "a.pdf", "--format", "markdown"]);
        assert_eq!(format, Some(OutputFormat::Markdown));
    }

    #[test]
    fn extract_format_is_optional() {
        let (_, format) = parse_extract(&["somark", "extract", "scan.png"]);
        assert_eq!(format, None);
    }

    #[test]
    fn extract_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["somark", "extract", "a.pdf", "-f", "docx"]).is_err());
    }

    #[test]
    fn extract_requires_a_file() {
        assert!(Cli::try_parse_from(["somark", "extract"]).is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "somark", "status", "--config", "/tmp/c.yaml", "--log-level", "debug",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Status));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
