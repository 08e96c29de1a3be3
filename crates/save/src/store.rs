//! Save directory and JSON encoding

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use blockfall_core::GameSnapshot;
use tracing::{debug, info};

use crate::record::SaveFile;
use crate::SaveError;

const EXTENSION: &str = "json";

/// Pretty-printed JSON for a snapshot
pub fn encode(snapshot: &GameSnapshot) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&SaveFile::from(snapshot))?)
}

/// Parse and validate a save file
pub fn decode(text: &str) -> Result<GameSnapshot, SaveError> {
    let file: SaveFile = serde_json::from_str(text)?;
    GameSnapshot::try_from(&file)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveConfig {
    pub dir: PathBuf,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("resources/saves"),
        }
    }
}

impl SaveConfig {
    /// `BLOCKFALL_SAVE_DIR`, or `resources/saves`
    pub fn from_env() -> Self {
        env::var("BLOCKFALL_SAVE_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|dir| Self {
                dir: PathBuf::from(dir),
            })
            .unwrap_or_default()
    }
}

/// Named saves in one directory, one `<name>.json` per save
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &SaveConfig) -> Self {
        Self::new(config.dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a save, creating the directory if needed. Returns the file path.
    pub fn save(&self, name: &str, snapshot: &GameSnapshot) -> Result<PathBuf, SaveError> {
        let path = self.path_for(name)?;
        let text = encode(snapshot)?;
        fs::create_dir_all(&self.dir).map_err(|source| SaveError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), score = snapshot.score, "game saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<GameSnapshot, SaveError> {
        let path = self.path_for(name)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(SaveError::NotFound(name.to_string()))
            }
            Err(source) => return Err(SaveError::Io { path, source }),
        };
        let snapshot = decode(&text)?;
        debug!(path = %path.display(), "game loaded");
        Ok(snapshot)
    }

    /// Save names, sorted. A missing directory has no saves.
    pub fn list(&self) -> Result<Vec<String>, SaveError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SaveError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SaveError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SaveError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.chars().any(char::is_control);
        if !valid {
            return Err(SaveError::Name(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }
}
