use color_eyre::Result;
use lazy_static::lazy_static;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{self, Config};

lazy_static! {
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", config::PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// File logging into the data dir; the terminal belongs to the UI.
///
/// The returned guard flushes the non-blocking writer on drop and must be
/// held until the app exits.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let directory = if config.config.data_dir.as_os_str().is_empty() {
        config::get_data_dir()
    } else {
        config.config.data_dir.clone()
    };
    std::fs::create_dir_all(&directory)?;

    crate::errors::set_log_path(directory.join(LOG_FILE.as_str()));
    let file_appender = tracing_appender::rolling::never(&directory, LOG_FILE.as_str());
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = match EnvFilter::try_from_env(LOG_ENV.as_str()) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.log_level.as_deref().unwrap_or("info"))?,
    };

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(guard)
}
