use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridway_log::LogFormat;
use gridway_server::{
    create_rest_router, GatewayConfig, LcdQuerier, RemoteBroadcaster, RestGatewayState,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "gridway-lcd",
    about = "REST gateway for distribution reward withdrawals",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Write a default configuration to the home directory")]
    Init {
        #[arg(long, value_name = "DIR", help = "Home directory for configuration")]
        home: Option<PathBuf>,

        #[arg(long, help = "Replace an existing configuration file")]
        overwrite: bool,
    },

    #[command(about = "Start the REST gateway")]
    Start {
        #[arg(long, value_name = "DIR", help = "Home directory for configuration")]
        home: Option<PathBuf>,

        #[arg(long, value_name = "FILE", help = "Configuration file path")]
        config: Option<PathBuf>,

        #[arg(long, value_name = "ADDR", help = "Address to listen on")]
        listen: Option<String>,

        #[arg(long, value_name = "URL", help = "Node REST endpoint")]
        node: Option<String>,

        #[arg(long, value_name = "URL", help = "Signing service endpoint")]
        signer: Option<String>,

        #[arg(long, value_name = "LEVEL", help = "Log level (trace, debug, info, warn, error)")]
        log_level: Option<String>,
    },

    #[command(about = "Display version information")]
    Version,

    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(long, value_name = "DIR", help = "Home directory")]
        home: Option<PathBuf>,
    },

    #[command(about = "Validate configuration")]
    Validate {
        #[arg(value_name = "FILE", help = "Configuration file path")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { home, overwrite } => init_command(home, overwrite),
        Commands::Start {
            home,
            config,
            listen,
            node,
            signer,
            log_level,
        } => {
            let overrides = StartOverrides {
                listen,
                node,
                signer,
                log_level,
            };
            start_command(home, config, overrides).await
        }
        Commands::Version => version_command(),
        Commands::Config { command } => config_command(command),
    }
}

struct StartOverrides {
    listen: Option<String>,
    node: Option<String>,
    signer: Option<String>,
    log_level: Option<String>,
}

fn init_command(home: Option<PathBuf>, overwrite: bool) -> Result<()> {
    gridway_log::init_tracing(None, LogFormat::Plain)?;

    let home_dir = get_home_dir(home);
    tracing::info!("Home directory: {}", home_dir.display());

    GatewayConfig::init(&home_dir, overwrite)?;
    tracing::info!(
        "Configuration written to {}",
        GatewayConfig::config_file(&home_dir).display()
    );
    Ok(())
}

async fn start_command(
    home: Option<PathBuf>,
    config: Option<PathBuf>,
    overrides: StartOverrides,
) -> Result<()> {
    let home_dir = get_home_dir(home);
    let config_path = config.unwrap_or_else(|| GatewayConfig::config_file(&home_dir));
    let mut config = load_or_default(&config_path)?;

    if let Some(listen) = overrides.listen {
        config.listen_address = listen;
    }
    if let Some(node) = overrides.node {
        config.node_url = node;
    }
    if let Some(signer) = overrides.signer {
        config.signer_url = signer;
    }
    let log_level = overrides.log_level.unwrap_or_else(|| config.log.level.clone());

    gridway_log::init_tracing(Some(&log_level), config.log.format)?;
    config.validate()?;

    tracing::info!("Config file: {}", config_path.display());
    tracing::info!("Node endpoint: {}", config.node_url);
    tracing::info!("Signer endpoint: {}", config.signer_url);

    let querier = LcdQuerier::new(config.node_url.clone(), config.request_timeout())?;
    let broadcaster = RemoteBroadcaster::new(config.signer_url.clone(), config.request_timeout())?;
    let state = RestGatewayState::new(
        config.rest_config(),
        config.status_policy()?,
        Arc::new(querier),
        Arc::new(broadcaster),
    );
    let router = create_rest_router(Arc::new(state));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("REST gateway listening on {}", addr);

    serve(listener, router).await
}

async fn serve(listener: tokio::net::TcpListener, router: axum::Router) -> Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("REST gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}

fn version_command() -> Result<()> {
    println!("gridway-lcd {}", env!("CARGO_PKG_VERSION"));
    println!("build: {}", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn config_command(command: ConfigCommands) -> Result<()> {
    gridway_log::init_tracing(None, LogFormat::Plain)?;

    match command {
        ConfigCommands::Show { home } => {
            let home_dir = get_home_dir(home);
            let config = load_or_default(&GatewayConfig::config_file(&home_dir))?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Validate { file } => {
            let config = GatewayConfig::load_from_file(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            config.validate()?;
            tracing::info!("Configuration is valid");
        }
    }
    Ok(())
}

// Helper functions

fn get_home_dir(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_else(GatewayConfig::default_home_dir)
}

fn load_or_default(path: &Path) -> Result<GatewayConfig> {
    if path.exists() {
        GatewayConfig::load_from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))
    } else {
        tracing::debug!("{} not found, using defaults", path.display());
        Ok(GatewayConfig::default())
    }
}
