//! Solicitud relay entry point

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use docstore::DocStore;
use solicitud_relay::api::{self, AppState};
use solicitud_relay::auth;
use solicitud_relay::cli::{Cli, Command};
use solicitud_relay::config::Config;
use solicitud_relay::domain::Solicitud;
use solicitud_relay::lifecycle::Lifecycle;
use solicitud_relay::notify::{HttpMailer, Notifier};
use solicitud_relay::state::StateManager;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        None => cmd_serve(config, None).await,
        Some(Command::Serve { port }) => cmd_serve(config, port).await,
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::HashClave { clave, salt }) => {
            println!("{}", auth::hash_clave(&clave, &salt));
            Ok(())
        }
    }
}

async fn cmd_serve(config: Config, port_override: Option<u16>) -> Result<()> {
    let port = port_override.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", config.server.bind, port)
        .parse()
        .context("Invalid bind address")?;

    let store: DocStore<Solicitud> = DocStore::open(&config.storage.data_file)?;
    info!("Storing solicitudes in {}", config.storage.data_file.display());

    let state = StateManager::spawn(store);

    let notifier: Option<Arc<dyn Notifier>> =
        HttpMailer::from_config(&config.mail)?.map(|m| Arc::new(m) as Arc<dyn Notifier>);

    let lifecycle = Lifecycle::new(state, notifier, config.mail.admin_to.clone());

    let app_state = AppState {
        lifecycle: Arc::new(lifecycle),
        auth: config.auth.clone(),
    };

    api::run_server(addr, app_state).await
}

fn cmd_check_config(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    print!("{yaml}");
    Ok(())
}
