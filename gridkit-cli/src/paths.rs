//! Platform-specific directory paths and log file housekeeping.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept next to `latest.log`.
pub const KEEP_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "gridkit", "gridkit")
}

/// Directory holding the log files.
///
/// - Linux: `$XDG_CACHE_HOME/gridkit` or `~/.cache/gridkit`
/// - macOS: `~/Library/Caches/dev.gridkit.gridkit`
/// - Windows: `C:\Users\<User>\AppData\Local\gridkit\gridkit\cache`
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default format options file.
///
/// - Linux: `$XDG_CONFIG_HOME/gridkit/config.json`
/// - macOS: `~/Library/Application Support/dev.gridkit.gridkit/config.json`
/// - Windows: `C:\Users\<User>\AppData\Roaming\gridkit\gridkit\config\config.json`
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// Prepare `dir` for a fresh log and return the new log's path.
///
/// An existing `latest.log` is archived under a timestamped name and only
/// the newest `keep` archives survive.
pub fn rotate_logs(dir: &Path, keep: usize) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let latest = dir.join(LATEST_LOG);

    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        fs::rename(&latest, dir.join(format!("{stamp}.log")))?;
    }

    let mut archived: Vec<_> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Newest first
    archived.sort_by_key(|entry| {
        std::cmp::Reverse(entry.metadata().and_then(|m| m.modified()).ok())
    });
    for entry in archived.iter().skip(keep) {
        let _ = fs::remove_file(entry.path());
    }

    Ok(latest)
}
