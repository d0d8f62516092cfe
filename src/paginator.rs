//! Deletion-resilient pagination.
//!
//! Rows are addressed by the position they had when the source was loaded.
//! Positions are never reassigned, so deleting a row leaves a gap instead of
//! shifting everything after it, and a client resuming from a `next_index`
//! neither skips nor repeats surviving rows.

use std::{
    collections::BTreeMap,
    sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard},
};

use crate::{
    error::{ArgumentError, Error, LoadError},
    range::index_range,
    source::{Row, Source},
    Result,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Rows keyed by their original position.
#[derive(Debug)]
pub struct IndexedDataset {
    /// Size of the original index space, fixed at build time.
    span: usize,
    rows: RwLock<BTreeMap<usize, Row>>,
}

/// Result of [`Paginator::get_page`].
#[derive(Debug, PartialEq, Clone)]
pub struct PageMetadata {
    /// Requested starting position.
    pub index: usize,
    pub data: Vec<Row>,
    /// Number of rows actually returned.
    pub page_size: usize,
    /// Where to resume. `None` once the index space is exhausted.
    pub next_index: Option<usize>,
}

/// Result of [`Paginator::hyper`].
#[derive(Debug, PartialEq, Clone)]
pub struct HyperPage {
    pub page_size: usize,
    pub page: usize,
    pub data: Vec<Row>,
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
    pub total_pages: usize,
}

/// Serves pages of a [`Source`] that is loaded once, on first access.
#[derive(Debug)]
pub struct Paginator<S> {
    source: S,
    dataset: OnceLock<std::result::Result<Vec<Row>, LoadError>>,
    indexed: OnceLock<IndexedDataset>,
}

impl IndexedDataset {
    fn new(dataset: &[Row]) -> Self {
        Self {
            span: dataset.len(),
            rows: RwLock::new(dataset.iter().cloned().enumerate().collect()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<usize, Row>> {
        // every write is a single `remove`, a poisoned map is still consistent
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Size of the original index space.
    pub fn span(&self) -> usize {
        self.span
    }

    /// Number of rows still present.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.read().contains_key(&position)
    }

    pub fn get(&self, position: usize) -> Option<Row> {
        self.read().get(&position).cloned()
    }

    /// Removes a position without touching any other key.
    pub fn remove(&self, position: usize) -> Option<Row> {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&position)
    }

    /// Collects up to `limit` present rows starting at `index` and returns
    /// them along with the position right after the last one inspected.
    ///
    /// Deleted positions are skipped through the ordered map instead of being
    /// probed one by one, which yields the same rows and the same resume point.
    fn scan(&self, index: usize, limit: usize) -> (Vec<Row>, usize) {
        let rows = self.read();
        let mut data = Vec::with_capacity(limit.min(self.span - index));
        let mut current = self.span;

        for (position, row) in rows.range(index..self.span).take(limit) {
            data.push(row.clone());
            current = position + 1;
        }

        if data.len() < limit {
            current = self.span;
        }

        (data, current)
    }
}

impl<S: Source> Paginator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            dataset: OnceLock::new(),
            indexed: OnceLock::new(),
        }
    }

    /// The full dataset, loaded on first call.
    ///
    /// A failed load is remembered: every later call returns the same error.
    pub fn dataset(&self) -> std::result::Result<&[Row], LoadError> {
        let loaded = self.dataset.get_or_init(|| {
            let loaded = self.source.load();
            match &loaded {
                Ok(rows) => crate::info!("Loaded {} rows from source", rows.len()),
                Err(err) => crate::error!("{err}"),
            }

            loaded
        });

        match loaded {
            Ok(rows) => Ok(rows),
            Err(err) => Err(err.clone()),
        }
    }

    /// Dataset keyed by original position, built once after [`Self::dataset`].
    pub fn indexed_dataset(&self) -> std::result::Result<&IndexedDataset, LoadError> {
        if let Some(indexed) = self.indexed.get() {
            return Ok(indexed);
        }

        let dataset = self.dataset()?;
        Ok(self.indexed.get_or_init(|| IndexedDataset::new(dataset)))
    }

    /// Same as [`Self::get_page`] for callers whose index is optional.
    pub fn get_page_from(&self, index: Option<usize>, page_size: usize) -> Result<PageMetadata> {
        match index {
            Some(index) => self.get_page(index, page_size),
            None => Err(rejected(ArgumentError::MissingIndex)),
        }
    }

    /// Returns up to `page_size` surviving rows starting at position `index`.
    ///
    /// `index` must be inside the original index space and `page_size` must
    /// be positive. Passing the returned `next_index` back continues exactly
    /// where this page stopped, whatever was deleted in between.
    pub fn get_page(&self, index: usize, page_size: usize) -> Result<PageMetadata> {
        let indexed = self.indexed_dataset()?;

        if index >= indexed.span() {
            return Err(rejected(ArgumentError::IndexOutOfRange {
                index,
                len: indexed.span(),
            }));
        }

        if page_size == 0 {
            return Err(rejected(ArgumentError::ZeroPageSize));
        }

        let (data, current) = indexed.scan(index, page_size);
        let next_index = (current < indexed.span()).then_some(current);

        Ok(PageMetadata {
            index,
            page_size: data.len(),
            data,
            next_index,
        })
    }

    /// Removes the row at `position` from the indexed dataset.
    ///
    /// Returns `None` if the position was never assigned or is already gone.
    pub fn delete(&self, position: usize) -> Result<Option<Row>> {
        let removed = self.indexed_dataset()?.remove(position);
        if removed.is_some() {
            crate::debug!("Deleted row at position {position}");
        }

        Ok(removed)
    }

    /// Plain offset pagination over the loaded dataset, ignoring deletions.
    pub fn page(&self, page: usize, page_size: usize) -> Result<Vec<Row>> {
        check_page(page, page_size)?;

        let dataset = self.dataset()?;
        let (start, end) = index_range(page, page_size);

        Ok(dataset
            .get(start..end.min(dataset.len()))
            .unwrap_or_default()
            .to_vec())
    }

    /// Offset pagination with links to the neighbouring pages.
    pub fn hyper(&self, page: usize, page_size: usize) -> Result<HyperPage> {
        let data = self.page(page, page_size)?;
        let total_pages = self.dataset()?.len().div_ceil(page_size);

        Ok(HyperPage {
            page_size: data.len(),
            page,
            data,
            next_page: (page < total_pages).then_some(page + 1),
            prev_page: (page > 1).then(|| page - 1),
            total_pages,
        })
    }
}

fn check_page(page: usize, page_size: usize) -> Result<()> {
    if page == 0 {
        return Err(rejected(ArgumentError::ZeroPage));
    }

    if page_size == 0 {
        return Err(rejected(ArgumentError::ZeroPageSize));
    }

    Ok(())
}

fn rejected(err: ArgumentError) -> Error {
    crate::warn!("Rejected pagination request: {err}");
    err.into()
}
