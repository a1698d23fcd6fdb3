//! Where the high-score record lives.

use super::types::HighScore;
use crate::core::constants::HIGH_SCORE_FILE;
use crate::utils::persistence::{load_json, save_json, save_path};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Durable storage for the single high-score record.
pub trait ScoreStore {
    /// Human-readable location, for log lines.
    fn describe(&self) -> String;

    /// `Ok(None)` when nothing has been recorded yet.
    fn load(&self) -> io::Result<Option<HighScore>>;

    fn save(&mut self, record: &HighScore) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;
}

/// The record as pretty-printed JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// ~/.urlsnake/high_score.json
    pub fn in_data_dir() -> io::Result<Self> {
        Ok(Self::at(save_path(HIGH_SCORE_FILE)?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> io::Result<Option<HighScore>> {
        load_json(&self.path)
    }

    fn save(&mut self, record: &HighScore) -> io::Result<()> {
        save_json(&self.path, record)
    }

    fn clear(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Keeps the record in memory; optionally fails every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<HighScore>,
    fail_io: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: HighScore) -> Self {
        Self {
            record: Some(record),
            fail_io: false,
        }
    }

    /// A store whose every read and write fails, like an unwritable home directory.
    pub fn unavailable() -> Self {
        Self {
            record: None,
            fail_io: true,
        }
    }

    fn check(&self) -> io::Result<()> {
        if self.fail_io {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "storage unavailable",
            ));
        }
        Ok(())
    }
}

impl ScoreStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn load(&self) -> io::Result<Option<HighScore>> {
        self.check()?;
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &HighScore) -> io::Result<()> {
        self.check()?;
        self.record = Some(record.clone());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.check()?;
        self.record = None;
        Ok(())
    }
}
