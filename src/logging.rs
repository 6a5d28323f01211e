use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Initialise logging. With `debug` the default level is `debug` and `RUST_LOG`
/// may override it; otherwise the level is pinned to `info`.
///
/// When `log_file` is given, output goes to that file instead of stderr. Calling
/// this more than once keeps the first subscriber.
pub fn init(debug: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let appender = file_appender(&path)?;
            let _ = builder.with_writer(appender).with_ansi(false).try_init();
        }
        None => {
            let _ = builder.try_init();
        }
    }
    Ok(())
}

fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("open log file {}", path.display()))
}
