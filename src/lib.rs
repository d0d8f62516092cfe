use error::Error;

pub mod config;
pub mod error;
pub mod log;
pub(crate) mod os;
pub mod paginator;
pub mod range;
pub mod source;

pub use paginator::{HyperPage, IndexedDataset, PageMetadata, Paginator, DEFAULT_PAGE_SIZE};
pub use range::index_range;
pub use source::{CsvFile, Row, Source};

pub type Result<T> = std::result::Result<T, Error>;
