use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

use crate::achievements::{self, Achievement};

pub const HIGH_SCORE_KEY: &str = "highScore";
pub const SCORE_KEY: &str = "score";
pub const ACHIEVEMENTS_KEY: &str = "achievements";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("codec: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Plain key-value persistence. No transactions across keys.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable store: a single `kv` table in a SQLite file.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            [],
        )?;
        Ok(Self { conn })
    }

    /// When `key` was last written, as stored (RFC 3339).
    pub fn updated_at(&self, key: &str) -> Result<Option<String>, StoreError> {
        let ts = self
            .conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(ts)
    }
}

impl ScoreStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// Read an integer value. Missing or unparseable values yield `None`;
/// store errors are logged and treated as missing.
pub fn load_int<S: ScoreStore + ?Sized>(store: &S, key: &str) -> Option<u32> {
    match store.get(key) {
        Ok(Some(raw)) => match raw.trim().parse::<u32>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(key, raw = %raw, "ignoring undecodable stored integer");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(key, %err, "store read failed");
            None
        }
    }
}

/// Best-effort write; failures are logged and dropped.
pub fn save_int<S: ScoreStore + ?Sized>(store: &mut S, key: &str, value: u32) {
    if let Err(err) = store.set(key, &value.to_string()) {
        tracing::warn!(key, value, %err, "store write failed");
    }
}

pub fn load_high_score<S: ScoreStore + ?Sized>(store: &S) -> u32 {
    load_int(store, HIGH_SCORE_KEY).unwrap_or(0)
}

/// Achievement list, falling back to the ten locked defaults when nothing
/// usable is stored.
pub fn load_achievements<S: ScoreStore + ?Sized>(store: &S) -> Vec<Achievement> {
    match store.get(ACHIEVEMENTS_KEY) {
        Ok(Some(payload)) => achievements::decode(&payload).unwrap_or_else(|| {
            tracing::warn!("stored achievements undecodable, using defaults");
            achievements::defaults()
        }),
        Ok(None) => achievements::defaults(),
        Err(err) => {
            tracing::warn!(%err, "achievements read failed, using defaults");
            achievements::defaults()
        }
    }
}

pub fn save_achievements<S: ScoreStore + ?Sized>(
    store: &mut S,
    list: &[Achievement],
) -> Result<(), StoreError> {
    let payload = achievements::encode(list)?;
    store.set(ACHIEVEMENTS_KEY, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn sqlite_store_upserts_and_stamps() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get(SCORE_KEY).unwrap(), None);
        assert_eq!(store.updated_at(SCORE_KEY).unwrap(), None);

        store.set(SCORE_KEY, "6").unwrap();
        store.set(SCORE_KEY, "9").unwrap();
        assert_eq!(store.get(SCORE_KEY).unwrap().as_deref(), Some("9"));

        let stamp = store.updated_at(SCORE_KEY).unwrap().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn sqlite_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            save_int(&mut store, HIGH_SCORE_KEY, 42);
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(load_high_score(&store), 42);
    }

    #[test]
    fn high_score_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn garbage_integer_is_ignored() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "lots").unwrap();
        assert_eq!(load_high_score(&store), 0);
        store.set(HIGH_SCORE_KEY, " 17 ").unwrap();
        assert_eq!(load_high_score(&store), 17);
    }

    #[test]
    fn achievements_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        assert_eq!(load_achievements(&store), achievements::defaults());
        store.set(ACHIEVEMENTS_KEY, "{broken").unwrap();
        assert_eq!(load_achievements(&store), achievements::defaults());
    }

    #[test]
    fn achievements_roundtrip_through_sqlite() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut list = achievements::defaults();
        list[4].unlocked = true;
        save_achievements(&mut store, &list).unwrap();
        let loaded = load_achievements(&store);
        assert!(loaded[4].unlocked);
        assert_eq!(loaded.iter().filter(|a| a.unlocked).count(), 1);
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn broken_store_degrades_to_defaults() {
        let mut store = BrokenStore;
        assert_eq!(load_high_score(&store), 0);
        assert_eq!(load_achievements(&store).len(), achievements::ACHIEVEMENT_COUNT);
        save_int(&mut store, SCORE_KEY, 3);
        assert!(save_achievements(&mut store, &achievements::defaults()).is_err());
    }
}
