use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typezenith";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Per-user state directory: `~/.local/state/typezenith`, or the
    /// platform data dir when `HOME` is unset.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn db_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("scores.db"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("typezenith.log"))
    }
}
