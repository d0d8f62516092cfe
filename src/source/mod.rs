//! Backing sources the paginator loads its dataset from.

mod csv;

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use crate::{
    error::LoadError,
    os::{Fs, Open},
};

/// An opaque record. Fields are never interpreted, only counted and returned.
pub type Row = Vec<String>;

/// Anything that produces an ordered sequence of rows.
pub trait Source {
    fn load(&self) -> Result<Vec<Row>, LoadError>;
}

/// In-memory source, mostly for tests.
impl Source for Vec<Row> {
    fn load(&self) -> Result<Vec<Row>, LoadError> {
        Ok(self.clone())
    }
}

/// Comma separated file whose first line is a header.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
    lock: bool,
}

impl CsvFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: false,
        }
    }

    /// Takes a shared advisory lock while reading, failing if a writer holds the file.
    pub fn lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unreadable(&self, err: std::io::Error) -> LoadError {
        LoadError::Unreadable {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}

impl Source for CsvFile {
    fn load(&self) -> Result<Vec<Row>, LoadError> {
        let mut file = Fs::options()
            .lock(self.lock)
            .open(&self.path)
            .map_err(|err| self.unreadable(err))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|err| self.unreadable(err))?;

        csv::parse(&csv::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_missing_file_is_unreadable() {
        let source = CsvFile::new("definitely/not/here.csv");

        match source.load() {
            Err(LoadError::Unreadable { path, .. }) => {
                assert_eq!(path, PathBuf::from("definitely/not/here.csv"))
            }
            other => panic!("expected unreadable source, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("pagina-source-{}.csv", std::process::id()));
        fs::write(&path, "name,count\nOlivia,172\nChloe,112\n").unwrap();

        let rows = CsvFile::new(&path).lock(true).load();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            rows,
            Ok(vec![
                vec!["Olivia".to_string(), "172".to_string()],
                vec!["Chloe".to_string(), "112".to_string()],
            ])
        );
    }

    #[test]
    fn test_memory_source() {
        let rows = vec![vec!["a".to_string()], vec!["b".to_string()]];
        assert_eq!(rows.load(), Ok(rows.clone()));
    }
}
