pub mod config;
pub mod core;

use std::io::{self, Write};
use std::sync::Once;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::core::connectivity::{probe, Connectivity};
use crate::core::feed::types::MalformedItemPolicy;
use crate::core::feed::FeedService;
use crate::core::loader::{LoaderCallbacks, PublicationLoader};
use crate::core::presentation::screen::NewsScreen;

static LOGGING: Once = Once::new();

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "newsapp", about = "List Guardian articles matching a search")]
pub struct Cli {
    /// Search terms sent as `q`
    #[arg(long)]
    pub query: Option<String>,
    /// Tag types sent as `show-tags`
    #[arg(long)]
    pub show_tags: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    /// Search endpoint the query parameters are appended to
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Request this URL verbatim instead of building one from the other options
    #[arg(long)]
    pub url: Option<String>,
    /// Drop malformed results instead of stopping at the first one
    #[arg(long)]
    pub skip_malformed: bool,
    #[arg(long)]
    pub skip_connectivity_check: bool,
    /// Print publications as JSON instead of rows
    #[arg(long)]
    pub json: bool,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
    #[error("could not encode publications: {0}")]
    Json(#[from] serde_json::Error),
}

/// Installs the stderr subscriber once. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    LOGGING.call_once(|| {
        let default_level = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}

pub fn apply_cli_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(query) = &cli.query {
        config.query = query.clone();
    }
    if let Some(show_tags) = &cli.show_tags {
        config.show_tags = show_tags.clone();
    }
    if let Some(api_key) = &cli.api_key {
        config.api_key = api_key.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if cli.skip_malformed {
        config.malformed_items = MalformedItemPolicy::Skip;
    }
    config
}

/// One screen lifetime: probe the network, load once, hand the result to the screen.
pub async fn load_screen(
    service: FeedService,
    request_url: &str,
    check_connectivity: bool,
) -> NewsScreen {
    let mut screen = NewsScreen::new();
    if check_connectivity && probe(request_url).await == Connectivity::Offline {
        screen.show_no_connection();
        return screen;
    }

    let handle = PublicationLoader::new(service, request_url).start();
    if let Err(error) = handle.deliver_to(&mut screen).await {
        tracing::error!(error = %error, "publication loader stopped before finishing");
        screen.on_loader_reset();
    }
    screen
}

pub fn write_screen<W: Write>(
    screen: &NewsScreen,
    json: bool,
    out: &mut W,
) -> Result<(), AppError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, screen.adapter().publications())?;
        writeln!(out)?;
    } else {
        screen.render(out)?;
    }
    Ok(())
}

/// `--url` wins over the URL built from `config`.
pub async fn screen_for_cli(cli: &Cli, config: &AppConfig) -> Result<NewsScreen, AppError> {
    let request_url = cli.url.clone().unwrap_or_else(|| config.request_url());
    let service = FeedService::from_config(config)?;
    Ok(load_screen(service, &request_url, !cli.skip_connectivity_check).await)
}

pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = apply_cli_overrides(AppConfig::load()?, &cli);
    let screen = screen_for_cli(&cli, &config).await?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_screen(&screen, cli.json, &mut out)?;
    out.flush()?;
    Ok(())
}
