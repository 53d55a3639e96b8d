use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use color_eyre::Result;
use color_eyre::eyre::Context;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// Console output goes to stderr and is off by default so it does not fight
/// with spinners and prompts. The file layer is only added when a path is
/// given.
pub fn init_tracing(console_level: &str, log_file: Option<&Path>, file_level: &str) -> Result<()> {
    let console_filter =
        EnvFilter::try_new(console_level).wrap_err("Failed to create console log filter")?;
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("Failed to open log file: {}", path.display()))?;
            let file_filter =
                EnvFilter::try_new(file_level).wrap_err("Failed to create file log filter")?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(file_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .wrap_err("Failed to install tracing subscriber")?;

    Ok(())
}
