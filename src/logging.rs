//! Sets up [`tracing`], which writes to a file since the terminal belongs to the UI.

use std::{fs, path::Path, sync::Mutex};

use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// The environment variable which overrides the log filter.
pub const ENV: &str = "PULSE_LOG";

/// The filter used when [`ENV`] isn't set.
pub const fn default_filter(debug: bool) -> &'static str {
    if debug {
        "pulse=debug"
    } else {
        "pulse=info"
    }
}

/// Starts logging to `pulse.log` inside of `dir`.
pub fn init(dir: &Path, debug: bool) -> crate::Result<()> {
    fs::create_dir_all(dir)?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("pulse.log"))?;

    let filter = EnvFilter::try_from_env(ENV).or_else(|_| EnvFilter::try_new(default_filter(debug)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(())
}
