use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::content::LoadError;

/// A directory of JSON dataset documents.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    /// The per-user data directory, created on demand.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(Self::default_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Open an existing directory for reading without creating it.
    pub fn open(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("combicards")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    pub fn read_raw(&self, name: &str) -> Result<String, LoadError> {
        let path = self.file_path(name);
        fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LoadError::Missing(path.display().to_string()),
            _ => LoadError::Io(format!("{}: {err}", path.display())),
        })
    }

    /// Serialize `data` as pretty JSON, replacing `name` atomically.
    pub fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
