//! Highscore persistence
//!
//! A single non-negative integer stored at a fixed path, encoded as its
//! decimal ASCII representation and then hex-encoded. A missing file is not
//! an error (the highscore starts at 0); anything else propagates.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct HighscoreStore {
    path: PathBuf,
}

impl HighscoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored highscore, defaulting to 0 when no file exists
    pub fn load(&self) -> Result<u32> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read highscore file {}", self.path.display())
                })
            }
        };

        let decoded = hex::decode(&data)
            .with_context(|| format!("corrupt highscore file {}", self.path.display()))?;
        let text = String::from_utf8(decoded)
            .with_context(|| format!("corrupt highscore file {}", self.path.display()))?;
        text.trim()
            .parse()
            .with_context(|| format!("corrupt highscore file {}", self.path.display()))
    }

    /// Overwrite the stored highscore
    pub fn save(&self, score: u32) -> Result<()> {
        let encoded = hex::encode(score.to_string());
        fs::write(&self.path, encoded)
            .with_context(|| format!("failed to write highscore file {}", self.path.display()))
    }
}
