//! Append-then-partition record store.
//!
//! Records are appended while the store is open. `partition` seals the store
//! and hands out one `Window` per range; windows are carved off with
//! `split_at_mut`, so two windows can never alias the same record.

use crate::error::{StoreError, StoreResult};
use crate::types::{Record, Weakness};
use std::ops::Range;

/// Ordered collection of CVE records.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    sealed: bool,
}

impl RecordStore {
    /// Create an empty, open store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an open store from already-fetched records.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> StoreResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.append(record)?;
        }
        Ok(store)
    }

    /// Add a record to the end of the store.
    pub fn append(&mut self, record: Record) -> StoreResult<()> {
        if self.sealed {
            return Err(StoreError::Sealed);
        }
        if record.id.trim().is_empty() {
            return Err(StoreError::EmptyIdentifier);
        }
        self.records.push(record);
        Ok(())
    }

    /// Stop accepting new records. The length is fixed from here on.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the population phase is over.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// All records in store order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Extend the weaknesses of the record at `index` from a single thread.
    pub fn enrich_at(&mut self, index: usize, weaknesses: Vec<Weakness>) -> StoreResult<()> {
        let end = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(StoreError::NotOwned { index, start: 0, end })?;
        record.weaknesses.extend(weaknesses);
        Ok(())
    }

    /// Seal the store and split it into one window per range.
    ///
    /// Ranges must be non-empty, ascending and contiguous starting at 0, and
    /// must not run past the end of the store.
    pub fn partition(&mut self, ranges: &[Range<usize>]) -> StoreResult<Vec<Window<'_>>> {
        self.seal();

        let total = self.records.len();
        let mut expected_start = 0;
        for range in ranges {
            if range.start != expected_start {
                return Err(StoreError::InvalidPartition(format!(
                    "range {:?} does not start at {}",
                    range, expected_start
                )));
            }
            if range.is_empty() {
                return Err(StoreError::InvalidPartition(format!(
                    "range {:?} is empty",
                    range
                )));
            }
            if range.end > total {
                return Err(StoreError::InvalidPartition(format!(
                    "range {:?} exceeds store length {}",
                    range, total
                )));
            }
            expected_start = range.end;
        }

        let mut windows = Vec::with_capacity(ranges.len());
        let mut rest: &mut [Record] = &mut self.records;
        for range in ranges {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            windows.push(Window {
                start: range.start,
                records: head,
            });
            rest = tail;
        }

        Ok(windows)
    }
}

/// Exclusive access to a contiguous run of records.
///
/// Indices passed to a window are absolute store indices.
#[derive(Debug)]
pub struct Window<'a> {
    start: usize,
    records: &'a mut [Record],
}

impl<'a> Window<'a> {
    /// Absolute range of store indices this window owns.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        index
            .checked_sub(self.start)
            .and_then(|offset| self.records.get(offset))
    }

    /// Extend the weaknesses of a record this window owns.
    pub fn enrich_at(&mut self, index: usize, weaknesses: Vec<Weakness>) -> StoreResult<()> {
        let Range { start, end } = self.range();
        let record = index
            .checked_sub(self.start)
            .and_then(|offset| self.records.get_mut(offset))
            .ok_or(StoreError::NotOwned { index, start, end })?;
        record.weaknesses.extend(weaknesses);
        Ok(())
    }
}
