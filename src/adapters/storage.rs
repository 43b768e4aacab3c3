use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON document on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn create_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl Storage for LocalStorage {
    fn location(&self) -> &Path {
        &self.path
    }

    fn ensure_initialized(&self, empty: &[u8]) -> Result<()> {
        self.create_parent_dir()?;
        if !self.path.exists() {
            tracing::debug!("Creating empty records file at {}", self.path.display());
            self.write(empty)?;
        }
        Ok(())
    }

    fn read(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        self.create_parent_dir()?;

        // Stage next to the target so the rename stays on one filesystem.
        let staging = self.staging_path();
        fs::write(&staging, data)?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }
}
