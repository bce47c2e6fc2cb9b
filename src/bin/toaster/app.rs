use std::path::PathBuf;
use std::sync::Arc;

use tokio::signal;
use toaster::config::Config;
use toaster::error::ConfigError;
use toaster::host::ConsoleHost;
use toaster::telemetry::init_tracing;
use toaster::types::Severity;
use toaster::{Result, ToastHandle, ToastManager, ToastOptions};
use tracing::{info, warn};

use super::cli::{Cli, Command};

const DEFAULT_CONFIG: &str = "toaster.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = Config::from_env_and_file(&config_path)?;

    let host = Arc::new(ConsoleHost::stdout());
    let manager = ToastManager::new(
        host.clone(),
        config.defaults.clone(),
        config.manager.clone(),
    )?;

    if cli.skip_assets {
        info!("asset probe skipped");
    } else {
        let readiness = manager.prepare_assets(host.as_ref(), &config.assets).await;
        if !readiness.is_ready() {
            warn!(?readiness, "continuing without styling assets");
        }
    }

    let handle = dispatch(&manager, cli.command)?;
    info!(toast_id = %handle.id(), "toast queued; waiting for it to close");

    tokio::select! {
        () = manager.wait_idle() => {}
        _ = signal::ctrl_c() => {
            info!("shutdown signal received, closing toasts");
            manager.close_all();
            manager.wait_idle().await;
        }
    }

    info!("all toasts removed");
    Ok(())
}

fn dispatch(manager: &ToastManager, command: Command) -> Result<ToastHandle> {
    let (severity, args) = match command {
        Command::Show(args) => {
            let base = match args.options.as_deref() {
                Some(json) => serde_json::from_str::<ToastOptions>(json).map_err(|err| {
                    ConfigError::InvalidField {
                        field: "cli.options",
                        message: err.to_string(),
                    }
                })?,
                None => ToastOptions::new(),
            };
            return Ok(manager.show(base.overlay(args.style.to_options())));
        }
        Command::Success(args) => (Severity::Success, args),
        Command::Error(args) => (Severity::Error, args),
        Command::Warning(args) => (Severity::Warning, args),
        Command::Info(args) => (Severity::Info, args),
    };

    Ok(manager.notify(
        severity,
        args.message,
        args.title.as_deref(),
        args.style.to_options(),
    ))
}
