//! File logging
//!
//! The terminal belongs to the UI, so log output goes to a file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "weatherhub.log";

/// `<cache dir>/weatherhub/weatherhub.log`, falling back to the temp dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("weatherhub")
        .join(LOG_FILE_NAME)
}

/// Open `path` for appending, creating parent directories as needed.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// The first candidate that opens, with its path.
fn open_first(candidates: &[PathBuf]) -> Option<(PathBuf, File)> {
    candidates
        .iter()
        .find_map(|path| match open_log_file(path) {
            Ok(file) => Some((path.clone(), file)),
            Err(e) => {
                eprintln!("Cannot open log file {}: {e}", path.display());
                None
            }
        })
}

/// Install the global subscriber. `RUST_LOG` controls the filter (default
/// `info`).
///
/// Tries `log_file` (or [`default_log_path`]), then the temp dir. Returns the
/// path being written to, or `None` when no file could be opened and logging
/// is off.
pub fn init(log_file: Option<&Path>) -> Option<PathBuf> {
    let candidates = [
        log_file
            .map(Path::to_path_buf)
            .unwrap_or_else(default_log_path),
        std::env::temp_dir().join("weatherhub").join(LOG_FILE_NAME),
    ];
    let (path, file) = open_first(&candidates)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}
