//! Offset Index
//!
//! In-memory map from entity id to the byte offset of its latest record.
//! Pure derived state: built once by a full scan at startup, upserted after
//! every append, never persisted. Because the scan is strictly forward,
//! later records overwrite earlier ones and the map converges on the live
//! version of every id.
//!
//! Tombstoned ids keep their entry, pointing at the tombstone record; the
//! store resolves the tombstone and reports not-found.

use std::collections::HashMap;
use std::path::Path;

use uuid::Uuid;

use crate::error::Result;
use crate::log::{parse_id, scan, ScanControl};

/// Map from entity id to the offset of its most recent record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    map: HashMap<Uuid, u64>,
}

impl OffsetIndex {
    /// An empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index by scanning the whole log.
    ///
    /// A missing file yields an empty index.
    pub fn build(path: &Path) -> Result<Self> {
        let mut map = HashMap::new();
        scan(path, 0, |meta, _data, offset| {
            let id = parse_id(meta)?;
            map.insert(id, offset);
            Ok(ScanControl::Continue)
        })?;
        Ok(Self { map })
    }

    /// Offset of the latest record for `id`, if any record exists
    pub fn offset(&self, id: &Uuid) -> Option<u64> {
        self.map.get(id).copied()
    }

    /// Point `id` at the offset of a freshly appended record
    pub fn upsert(&mut self, id: Uuid, offset: u64) {
        self.map.insert(id, offset);
    }

    /// Iterate over all (id, offset) entries
    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &u64)> {
        self.map.iter()
    }

    /// Number of indexed ids
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
