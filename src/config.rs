use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MIN_COUNTDOWN_SECS: u32 = 30;
pub const MAX_COUNTDOWN_SECS: u32 = 300;
pub const DEFAULT_COUNTDOWN_SECS: u32 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub countdown_secs: u32,
    pub bell: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            bell: true,
        }
    }
}

impl Config {
    /// Copy with the countdown forced into the supported range.
    pub fn normalized(mut self) -> Self {
        self.countdown_secs = clamp_countdown(self.countdown_secs);
        self
    }
}

pub fn clamp_countdown(secs: u32) -> u32 {
    secs.clamp(MIN_COUNTDOWN_SECS, MAX_COUNTDOWN_SECS)
}

/// Step a countdown draft by `delta` seconds, staying within range.
pub fn nudge_countdown(secs: u32, delta: i32) -> u32 {
    let stepped = i64::from(secs) + i64::from(delta);
    clamp_countdown(stepped.clamp(0, i64::from(u32::MAX)) as u32)
}

/// Human label for a countdown duration, e.g. "1 minute 30 seconds".
pub fn describe_countdown(secs: u32) -> String {
    if secs < 60 {
        return format!("{secs} seconds");
    }
    let minutes = secs / 60;
    let seconds = secs % 60;
    let unit = if minutes > 1 { "minutes" } else { "minute" };
    if seconds == 0 {
        format!("{minutes} {unit}")
    } else {
        format!("{minutes} {unit} {seconds} seconds")
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typezenith") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typezenith_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg.normalized(),
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "config unreadable, using defaults")
                }
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            countdown_secs: 150,
            bell: false,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn out_of_range_countdown_is_clamped_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"countdown_secs": 5}"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.countdown_secs, MIN_COUNTDOWN_SECS);
        assert!(loaded.bell);
    }

    #[test]
    fn missing_or_broken_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
        fs::write(&path, "{{{").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn clamp_and_nudge() {
        assert_eq!(clamp_countdown(0), 30);
        assert_eq!(clamp_countdown(301), 300);
        assert_eq!(clamp_countdown(90), 90);
        assert_eq!(nudge_countdown(30, -1), 30);
        assert_eq!(nudge_countdown(299, 10), 300);
        assert_eq!(nudge_countdown(60, 1), 61);
    }

    #[test]
    fn countdown_labels() {
        assert_eq!(describe_countdown(45), "45 seconds");
        assert_eq!(describe_countdown(60), "1 minute");
        assert_eq!(describe_countdown(120), "2 minutes");
        assert_eq!(describe_countdown(90), "1 minute 30 seconds");
        assert_eq!(describe_countdown(245), "4 minutes 5 seconds");
    }
}
