mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod form;
mod route;
mod theme;
mod widgets;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;

use store_proto::client::StoreClient;
use store_proto::config::Config;
use store_proto::store::StoreId;

#[derive(Parser)]
#[command(name = "store-settings")]
#[command(about = "Rename or delete a store from the terminal")]
#[command(version)]
struct Args {
    #[arg(long, help = "Store to administer (overrides [session] store_id)")]
    store_id: Option<String>,

    #[arg(long, help = "Backend origin (overrides [api] base_url)")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = store_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = store_proto::platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("store-settings log: {}", log_path.display());
    tracing::info!("store-settings starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("config unreadable, using defaults: {:#}", e);
            Config::default()
        }
    };
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    if let Some(id) = args.store_id {
        config.session.store_id = Some(id);
    }

    let store_id = config
        .session
        .store_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(StoreId::new)
        .context("no store selected: pass --store-id or set [session] store_id")?;

    let client = StoreClient::from_config(&config.api)
        .with_context(|| format!("invalid backend url {:?}", config.api.base_url))?;
    tracing::info!("backend {} store {}", config.api.base_url, store_id);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let (tx, rx) = mpsc::channel::<app::AppMessage>(1024);
    let app = app::App::new(client, store_id, config.api.base_url.clone(), tx);
    let result = app.run(rx).await;

    if let Err(ref e) = result {
        tracing::error!("app exited with error: {:#}", e);
    }
    tracing::info!("store-settings exiting");
    result
}
