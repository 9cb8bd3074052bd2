//! File-backed implementation of the high-score boundary.

use std::{fs, io::ErrorKind, path::PathBuf};

use garden_snake_system_session::{HighScoreStore, StoreError};

/// Persists the single high-score scalar as a decimal integer in a text file.
#[derive(Debug)]
pub(crate) struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents
                .trim()
                .parse::<u32>()
                .map(Some)
                .map_err(|error| StoreError::Read(error.to_string())),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StoreError::Read(error.to_string())),
        }
    }

    fn save(&self, value: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|error| StoreError::Write(error.to_string()))?;
            }
        }
        fs::write(&self.path, format!("{value}\n"))
            .map_err(|error| StoreError::Write(error.to_string()))
    }
}
