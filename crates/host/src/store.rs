use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Key the best score is stored under.
const BEST_KEY: &str = "best2048";

/// Persistence capability for the best-ever score.
///
/// The session reducer never touches storage; the front end loads the best
/// score once at startup and saves it whenever a session improves on it.
pub trait ScoreStore {
    /// Load the persisted best score, defaulting to 0 when none exists.
    fn load_best(&mut self) -> Result<u64>;
    /// Persist a new best score, overwriting any previous value.
    fn save_best(&mut self, best: u64) -> Result<()>;
}

/// SQLite-backed score store.
///
/// Schema:
/// - session(meta_key TEXT PRIMARY KEY, meta_value TEXT)
pub struct SqliteScoreStore {
    path: PathBuf,
    conn: Connection,
}

impl SqliteScoreStore {
    /// Create or open the database at `path`, ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
        }
        let conn = Connection::open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS session (
                meta_key TEXT PRIMARY KEY,
                meta_value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self { path, conn })
    }

    /// Absolute path to the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for SqliteScoreStore {
    fn load_best(&mut self) -> Result<u64> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT meta_value FROM session WHERE meta_key = ?1",
                params![BEST_KEY],
                |row| row.get(0),
            )
            .optional()?;
        match value {
            Some(raw) => raw.parse::<u64>().with_context(|| {
                format!("corrupt best score {:?} in {}", raw, self.path.display())
            }),
            None => Ok(0),
        }
    }

    fn save_best(&mut self, best: u64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO session (meta_key, meta_value) VALUES (?1, ?2)
             ON CONFLICT(meta_key) DO UPDATE SET meta_value=excluded.meta_value",
            params![BEST_KEY, best.to_string()],
        )?;
        Ok(())
    }
}

/// In-memory store for tests and `--no-store` runs.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: u64,
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&mut self) -> Result<u64> {
        Ok(self.best)
    }

    fn save_best(&mut self, best: u64) -> Result<()> {
        self.best = best;
        Ok(())
    }
}
