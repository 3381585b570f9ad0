//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout.
//!
//! Filter priority: `GIT_DASH_LOG`, then `RUST_LOG`, then `warn,git_dash=info`.
//! Default file: `<data_local_dir>/git-dash/logs/git-dash-<pid>.log`.

use std::env;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Keeps the background writer alive; dropping it flushes the log.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub fn init(log_file: Option<PathBuf>) -> anyhow::Result<LogGuard> {
    let (dir, filename) = resolve_log_path(log_file);
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, &filename);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    Registry::default()
        .with(filter())
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;

    Ok(LogGuard {
        _file_guard: guard,
        log_file: dir.join(filename),
    })
}

fn filter() -> EnvFilter {
    if let Ok(directives) = env::var("GIT_DASH_LOG") {
        return EnvFilter::new(directives);
    }
    if let Ok(directives) = env::var("RUST_LOG") {
        return EnvFilter::new(directives);
    }
    EnvFilter::new("warn,git_dash=info")
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("git-dash-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("git-dash")
        .join("logs");
    (dir, filename)
}
