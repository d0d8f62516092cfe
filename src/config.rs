//! Runtime configuration read from the process environment.

use std::{env, fmt::Display, path::PathBuf};

use crate::{
    log::{Level, LOG_FILE_PATH},
    paginator::DEFAULT_PAGE_SIZE,
    source::CsvFile,
};

pub const DEFAULT_SOURCE: &str = "data.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// CSV file backing the dataset.
    pub source: PathBuf,
    pub page_size: usize,
    pub log_level: Level,
    pub log_file: PathBuf,
    /// Take a shared lock on the source while loading it.
    pub lock_source: bool,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Variable name and the offending value.
    InvalidValue(&'static str, String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: Level::Info,
            log_file: PathBuf::from(LOG_FILE_PATH),
            lock_source: false,
        }
    }
}

impl Config {
    /// Defaults overridden by any `PAGINA_*` variable that is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(source) = var("PAGINA_SOURCE") {
            config.source = PathBuf::from(source);
        }

        if let Some(page_size) = var("PAGINA_PAGE_SIZE") {
            config.page_size = parse_page_size("PAGINA_PAGE_SIZE", &page_size)?;
        }

        if let Some(level) = var("PAGINA_LOG_LEVEL") {
            config.log_level = Level::try_from(level.as_str())
                .map_err(|_| ConfigError::InvalidValue("PAGINA_LOG_LEVEL", level.clone()))?;
        }

        if let Some(log_file) = var("PAGINA_LOG_FILE") {
            config.log_file = PathBuf::from(log_file);
        }

        if let Some(lock) = var("PAGINA_LOCK_SOURCE") {
            config.lock_source = match lock.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidValue("PAGINA_LOCK_SOURCE", lock)),
            };
        }

        Ok(config)
    }

    pub fn csv_source(&self) -> CsvFile {
        CsvFile::new(&self.source).lock(self.lock_source)
    }
}

/// Page sizes must be positive integers.
pub fn parse_page_size(name: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidValue(name, value.to_string())),
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue(name, value) => write!(f, "Invalid value '{value}' for {name}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::from_vars(vars(&[])), Ok(Config::default()));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("PAGINA_SOURCE", "Popular_Baby_Names.csv"),
            ("PAGINA_PAGE_SIZE", "25"),
            ("PAGINA_LOG_LEVEL", "debug"),
            ("PAGINA_LOCK_SOURCE", "true"),
        ]))
        .unwrap();

        assert_eq!(config.source, PathBuf::from("Popular_Baby_Names.csv"));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_level, Level::Debug);
        assert_eq!(config.log_file, PathBuf::from(LOG_FILE_PATH));
        assert!(config.lock_source);
        assert_eq!(
            config.csv_source().path(),
            PathBuf::from("Popular_Baby_Names.csv").as_path()
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_vars(vars(&[("PAGINA_PAGE_SIZE", "0")])),
            Err(ConfigError::InvalidValue("PAGINA_PAGE_SIZE", "0".into()))
        );
        assert_eq!(
            Config::from_vars(vars(&[("PAGINA_LOG_LEVEL", "loud")])),
            Err(ConfigError::InvalidValue("PAGINA_LOG_LEVEL", "loud".into()))
        );
        assert_eq!(
            Config::from_vars(vars(&[("PAGINA_LOCK_SOURCE", "maybe")])),
            Err(ConfigError::InvalidValue("PAGINA_LOCK_SOURCE", "maybe".into()))
        );
    }
}
