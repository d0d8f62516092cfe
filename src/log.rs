//! This module provides a simple logging API.
//!
//! Logging is opt-in: until [`init`] is called every message is dropped.

use std::{
    fmt::Display,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, OnceLock, PoisonError,
    },
};

#[repr(usize)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub enum Level {
    /// Designates serious errors.
    Error = 1,
    /// Designates hazardous situations.
    Warn,
    /// Designates useful information.
    Info,
    /// Designates lower priority information.
    Debug,
}

#[derive(Debug, PartialEq, PartialOrd)]
pub enum ParseError<'p> {
    InvalidString(&'p str),
}

static LOG_LEVEL: AtomicUsize = AtomicUsize::new(Level::Info as usize);
static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();

pub const LOG_FILE_PATH: &str = "pagina.log";

#[macro_export]
macro_rules! error {
    ($($args:tt)*) => {
        if let Err(e) = $crate::log::log(
            $crate::log::Level::Error,
            &format!("{}:{} - {}", file!(), line!(), format_args!($($args)*)),
        ) {
            eprintln!("Failed to log: {}", e)
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($($args:tt)*) => {
        if let Err(e) = $crate::log::log(
            $crate::log::Level::Warn,
            &format!("{}:{} - {}", file!(), line!(), format_args!($($args)*)),
        ) {
            eprintln!("Failed to log: {}", e)
        }
    };
}

#[macro_export]
macro_rules! info {
    ($($args:tt)*) => {
        if let Err(e) = $crate::log::log(
            $crate::log::Level::Info,
            &format!("{}:{} - {}", file!(), line!(), format_args!($($args)*)),
        ) {
            eprintln!("Failed to log: {}", e)
        }
    };
}

#[macro_export]
macro_rules! debug {
    ($($args:tt)*) => {
        if let Err(e) = $crate::log::log(
            $crate::log::Level::Debug,
            &format!("{}:{} - {}", file!(), line!(), format_args!($($args)*)),
        ) {
            eprintln!("Failed to log: {}", e)
        }
    };
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        };

        f.write_str(string)
    }
}

/// Opens (or creates) the log file and sets the global level.
///
/// Only the first call opens a file, later calls just change the level.
pub fn init(level: Level, path: impl AsRef<Path>) -> io::Result<()> {
    if LOG_FILE.get().is_none() {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        // losing the race just means another thread opened it first
        let _ = LOG_FILE.set(Mutex::new(file));
    }

    LOG_LEVEL.store(level as usize, Ordering::Release);

    Ok(())
}

#[doc(hidden)]
pub fn log(level: Level, message: &str) -> io::Result<()> {
    let global_level = LOG_LEVEL.load(Ordering::Acquire);
    if (level as usize) > global_level {
        return Ok(());
    }

    let Some(file) = LOG_FILE.get() else {
        return Ok(());
    };

    let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
    writeln!(file, "[{level:#?}]: {message}")?;
    file.flush()
}

impl<'p> TryFrom<&'p str> for Level {
    type Error = ParseError<'p>;

    fn try_from(s: &'p str) -> Result<Self, ParseError<'p>> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            _ => Err(ParseError::InvalidString(s)),
        }
    }
}

impl<'p> Display for ParseError<'p> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidString(s) => {
                write!(f, "Attempted to convert a string {s} that doesn't match a log level")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};

    use super::*;

    const TEST_LOG_FILE: &str = "pagina-test.log";

    #[test]
    fn test_level_parsing() {
        assert_eq!(Level::try_from("DEBUG"), Ok(Level::Debug));
        assert_eq!(Level::try_from("warn"), Ok(Level::Warn));
        assert_eq!(
            Level::try_from("verbose"),
            Err(ParseError::InvalidString("verbose"))
        );
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Info < Level::Debug);
    }

    #[test]
    fn test_error_content() {
        init(Level::Debug, TEST_LOG_FILE).unwrap();

        let content = "some really constructive error log";
        error!("{}", content);

        let log_file = File::open(TEST_LOG_FILE).unwrap();
        let found = BufReader::new(log_file)
            .lines()
            .map_while(|line| line.ok())
            .any(|line| line.contains("[Error]") && line.contains(content));

        assert!(found);
    }
}
