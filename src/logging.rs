use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Once};

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Send diagnostics to `path`, filtered by `RUST_LOG`.
///
/// The TUI owns stdout, so logging only happens when a file is given.
/// Later calls are ignored once a subscriber is installed.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let file = Arc::new(file);

    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("console_stopwatch=info"));

        fmt()
            .with_env_filter(env_filter)
            .with_writer(file)
            .with_ansi(false)
            .with_target(false)
            .compact()
            .init();
    });
    Ok(())
}
