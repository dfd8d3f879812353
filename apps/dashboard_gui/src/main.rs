use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, settings::DEFAULT_SETTINGS_FILE, Route};
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::runtime::BackendRuntime;
use ui::app::DashboardApp;

#[derive(Parser, Debug)]
#[command(about = "Ledger node dashboard")]
struct Args {
    /// Settings file. Defaults to `dashboard.toml` in the working directory,
    /// then in the user's config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    /// Page to open, e.g. `/5001/transactions`.
    #[arg(long)]
    route: Option<String>,
}

fn settings_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    if PathBuf::from(DEFAULT_SETTINGS_FILE).exists() {
        return None;
    }
    dirs::config_dir()
        .map(|dir| dir.join("ledger-dashboard").join(DEFAULT_SETTINGS_FILE))
        .filter(|path| path.exists())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut settings =
        load_settings(settings_path(args.config).as_deref()).context("loading settings")?;
    if let Some(base_url) = &args.base_url {
        settings.base_url = client_core::settings::normalize_base_url(base_url);
    }
    let route = match args.route.as_deref() {
        Some(path) => Route::parse(path).context("parsing --route")?,
        None => Route::Visualization {
            port: settings.default_port,
        },
    };

    let runtime = BackendRuntime::launch()?;
    let app = DashboardApp::new(runtime, settings, route.clone())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(route.title())
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Ledger Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow!("gui exited with error: {err}"))
}
