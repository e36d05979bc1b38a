//! Local flat-file store: the last fetched payload plus generated reports.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct DataStore {
    path: PathBuf,
}

impl DataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored payload.
    pub fn save_raw(&self, payload: &str) -> Result<(), StoreError> {
        write_file(&self.path, payload)?;
        debug!(path = %self.path.display(), bytes = payload.len(), "Stored archive payload");
        Ok(())
    }

    pub fn load_raw(&self) -> Result<String, StoreError> {
        fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

/// Write a rendered report, replacing any previous file.
pub fn write_report(path: &Path, report: &str) -> Result<(), StoreError> {
    write_file(path, report)
}

fn write_file(path: &Path, contents: &str) -> Result<(), StoreError> {
    let wrap = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, contents).map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_overwrites_previous_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("data").join("feed.csv"));

        store.save_raw("first payload, much longer than the second").unwrap();
        store.save_raw("second").unwrap();

        assert_eq!(store.load_raw().unwrap(), "second");
    }

    #[test]
    fn load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("absent.csv"));

        let err = store.load_raw().unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn report_file_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        write_report(&path, "----- WEATHER REPORT -----\n°C").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "----- WEATHER REPORT -----\n°C");
    }
}
