use std::{fmt::Display, path::PathBuf};

#[derive(Debug, PartialEq)]
pub enum Error {
    /// The caller asked for something outside the contract of the operation.
    InvalidArgument(ArgumentError),
    /// The backing source couldn't be read or parsed.
    Load(LoadError),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ArgumentError {
    /// Index is not inside `[0, len)` of the original index space.
    IndexOutOfRange { index: usize, len: usize },
    /// No starting index was given.
    MissingIndex,
    ZeroPageSize,
    /// Pages are 1-indexed.
    ZeroPage,
}

/// Failure while loading the backing source.
///
/// This is cloneable because a failed load is memoized by the
/// [paginator](crate::Paginator) and handed out again on every access.
#[derive(Debug, PartialEq, Clone)]
pub enum LoadError {
    Unreadable { path: PathBuf, reason: String },
    /// Line is 1-based and counts the header.
    Malformed { line: usize, reason: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "Invalid argument: {err}"),
            Self::Load(err) => write!(f, "{err}"),
        }
    }
}

impl Display for ArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for a dataset of {len} rows")
            }
            Self::MissingIndex => f.write_str("an index must be provided"),
            Self::ZeroPageSize => f.write_str("page size must be a positive integer"),
            Self::ZeroPage => f.write_str("page must be a positive integer"),
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { path, reason } => {
                write!(f, "Couldn't read source {}: {reason}", path.display())
            }
            Self::Malformed { line, reason } => {
                write!(f, "Malformed source at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for LoadError {}

impl From<ArgumentError> for Error {
    fn from(value: ArgumentError) -> Self {
        Error::InvalidArgument(value)
    }
}

impl From<LoadError> for Error {
    fn from(value: LoadError) -> Self {
        Error::Load(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_errors_convert_into_invalid_argument() {
        let err: Error = ArgumentError::ZeroPageSize.into();
        assert_eq!(err, Error::InvalidArgument(ArgumentError::ZeroPageSize));
    }

    #[test]
    fn display_messages() {
        let err: Error = ArgumentError::IndexOutOfRange { index: 10, len: 10 }.into();
        assert_eq!(
            err.to_string(),
            "Invalid argument: index 10 is out of range for a dataset of 10 rows"
        );

        let err: Error = LoadError::Malformed {
            line: 3,
            reason: "unterminated quoted field".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Malformed source at line 3: unterminated quoted field"
        );
    }
}
