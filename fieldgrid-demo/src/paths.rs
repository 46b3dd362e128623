//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "fieldgrid";
const APPLICATION: &str = "fieldgrid";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/fieldgrid` or `~/.config/fieldgrid`
/// - macOS: `~/Library/Application Support/dev.fieldgrid.fieldgrid`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/fieldgrid` or `~/.cache/fieldgrid`
/// - macOS: `~/Library/Caches/dev.fieldgrid.fieldgrid`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Archive `latest.log` under a timestamp and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache);
    }
}

/// [`rotate_logs`] for an explicit directory.
pub fn rotate_logs_in(dir: &Path) {
    let latest = dir.join("latest.log");

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        let archived = dir.join(format!("{}.log", timestamp));
        let _ = fs::rename(&latest, &archived);
    }

    prune_old_logs(dir, MAX_OLD_LOGS);
}

/// Remove archived logs beyond `keep`, oldest first.
fn prune_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != "latest.log"
        })
        .collect();

    // Timestamped names sort chronologically
    logs.sort_by_key(|e| e.file_name());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            if let Err(e) = fs::remove_file(entry.path()) {
                log::warn!("could not remove old log {:?}: {}", entry.path(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_archives_latest_and_keeps_limit() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..30 {
            fs::write(dir.path().join(format!("19990101_0000{:02}.log", i)), "old").unwrap();
        }
        fs::write(dir.path().join("latest.log"), "current").unwrap();

        rotate_logs_in(dir.path());

        assert!(!dir.path().join("latest.log").exists());
        let remaining: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(remaining.len(), MAX_OLD_LOGS);
        // The oldest were dropped, the fresh archive survived
        assert!(!remaining.contains(&"19990101_000000.log".to_string()));
        assert!(remaining.iter().any(|name| !name.starts_with("1999")));
    }
}
