use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Install the global tracing subscriber and `color_eyre` report hooks.
///
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_tracing(settings: &LoggingSettings) -> Result<()> {
    color_eyre::install()?;

    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
