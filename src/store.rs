//! Store Module
//!
//! The façade combining the log scanner, record codec, and offset index.
//!
//! ## Responsibilities
//! - Point lookup by id via the offset index
//! - Predicate-filtered full listing and year aggregation via full scans
//! - Append-based create and soft delete
//! - Destructive bulk re-initialization
//!
//! ## Concurrency Model: Single Writer, Serialized Readers
//!
//! One mutex guards the offset index, and every operation — reads included —
//! runs under it. The log file is opened fresh inside each operation while
//! the lock is held and dropped before returning, so no handle outlives a
//! call. There is no background work, retry, or timeout: I/O failures
//! surface to the caller immediately.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::entity::Entity;
use crate::error::{NewslogError, Result};
use crate::index::OffsetIndex;
use crate::log::{decode, encode_entity, scan, ScanControl};

/// Append-only record store for one logical collection of entities
pub struct Store<E: Entity> {
    /// Store configuration (log path, durability)
    config: Config,

    /// Offset index; the mutex serializes every operation on the store
    index: Mutex<OffsetIndex>,

    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Store<E> {
    /// Open a store over the configured log file.
    ///
    /// Builds the offset index by a full forward scan; later records win.
    /// A missing file is a valid empty log.
    pub fn open(config: Config) -> Result<Self> {
        let index = OffsetIndex::build(&config.log_path)?;
        info!(
            path = %config.log_path.display(),
            ids = index.len(),
            "opened store"
        );
        Ok(Self {
            config,
            index: Mutex::new(index),
            _entity: PhantomData,
        })
    }

    /// Path of the underlying log file
    pub fn log_path(&self) -> &Path {
        &self.config.log_path
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetch the live entity for `id`.
    ///
    /// Returns `None` if the id was never written or its latest record is a
    /// tombstone. Seeks straight to the indexed offset and decodes exactly
    /// one record.
    pub fn get_by_id(&self, id: Uuid) -> Result<Option<E>> {
        let index = self.index.lock();
        let offset = match index.offset(&id) {
            Some(offset) => offset,
            None => return Ok(None),
        };

        let mut found: Option<E> = None;
        scan(&self.config.log_path, offset, |meta, data, _| {
            let (record_id, entity) = decode::<E>(meta, data)?;
            if record_id != id {
                return Err(NewslogError::DataIntegrity(format!(
                    "record at indexed offset {offset} carries id {record_id}, expected {id}"
                )));
            }
            found = Some(entity);
            Ok(ScanControl::Stop)
        })?;

        Ok(found.filter(|entity| !entity.is_deleted()))
    }

    /// List every live entity, newest first
    pub fn get_all(&self) -> Result<Vec<E>> {
        self.find(|_| true)
    }

    /// List live entities accepted by `predicate`, newest first.
    ///
    /// The predicate is evaluated against every historical version of an id
    /// as the scan moves forward: an accepted version overwrites the working
    /// entry, a rejected version leaves the previous entry in place, and
    /// tombstones always overwrite. The last accepted version wins.
    pub fn find<F>(&self, mut predicate: F) -> Result<Vec<E>>
    where
        F: FnMut(&E) -> bool,
    {
        let _index = self.index.lock();

        let mut latest: HashMap<Uuid, E> = HashMap::new();
        scan(&self.config.log_path, 0, |meta, data, _| {
            let (id, entity) = decode::<E>(meta, data)?;
            if entity.is_deleted() || predicate(&entity) {
                latest.insert(id, entity);
            }
            Ok(ScanControl::Continue)
        })?;

        let mut result: Vec<E> = latest
            .into_values()
            .filter(|entity| !entity.is_deleted())
            .collect();
        result.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(result)
    }

    /// Distinct years across all live entities, newest first
    pub fn list_distinct_years(&self) -> Result<Vec<i32>> {
        let _index = self.index.lock();

        let mut dates: HashMap<Uuid, DateTime<Utc>> = HashMap::new();
        scan(&self.config.log_path, 0, |meta, data, _| {
            let (id, entity) = decode::<E>(meta, data)?;
            if entity.is_deleted() {
                dates.remove(&id);
            } else {
                dates.insert(id, entity.date());
            }
            Ok(ScanControl::Continue)
        })?;

        let mut years: Vec<i32> = dates.values().map(|date| date.year()).collect();
        years.sort_unstable();
        years.dedup();
        years.reverse();
        Ok(years)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Persist a new entity and return its freshly assigned id.
    ///
    /// Rejects entities that already carry an id: the store is the only
    /// source of identifiers.
    pub fn create(&self, mut entity: E) -> Result<Uuid> {
        if !entity.id().is_nil() {
            return Err(NewslogError::InvalidArgument(
                "entity already carries an id; ids are assigned by the store".to_string(),
            ));
        }
        entity.set_id(Uuid::new_v4());

        let mut index = self.index.lock();
        let id = entity.id();
        self.append(&mut index, &entity)?;
        debug!(%id, "created entity");
        Ok(id)
    }

    /// Soft-delete `id` by appending a tombstone record.
    ///
    /// Deliberately does not check that the id exists: deleting an unknown id
    /// appends a tombstone for it, which lookups already report as not-found,
    /// so the operation is idempotent from the caller's perspective.
    pub fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let mut tombstone = E::default();
        tombstone.set_id(id);
        tombstone.set_deleted(true);

        let mut index = self.index.lock();
        self.append(&mut index, &tombstone)?;
        debug!(%id, "appended tombstone");
        Ok(())
    }

    /// Destructively replace the log with the given entities.
    ///
    /// Assigns fresh ids to entities lacking one and appends them in order.
    /// Records are written to a temporary file which is atomically renamed
    /// over the log path on success, so a crash mid-initialize leaves the
    /// previous log intact.
    pub fn initialize(&self, entities: Vec<E>) -> Result<()> {
        let mut index = self.index.lock();

        let tmp_path = self.config.log_path.with_extension("tmp");
        let mut rebuilt = OffsetIndex::new();
        {
            let mut file = File::create(&tmp_path)?;
            let mut offset = 0u64;
            for mut entity in entities {
                if entity.id().is_nil() {
                    entity.set_id(Uuid::new_v4());
                }
                let block = encode_entity(&entity)?;
                file.write_all(block.as_bytes())?;
                rebuilt.upsert(entity.id(), offset);
                offset += block.len() as u64;
            }
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.config.log_path)?;

        info!(ids = rebuilt.len(), "log re-initialized");
        *index = rebuilt;
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Append one record at end-of-file and upsert its index entry.
    ///
    /// Called with the index lock held. The record's offset is the file
    /// length before the write; append mode keeps that stable under the
    /// single-writer discipline.
    fn append(&self, index: &mut OffsetIndex, entity: &E) -> Result<()> {
        let block = encode_entity(entity)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.log_path)?;
        let offset = file.metadata()?.len();

        file.write_all(block.as_bytes())?;
        if self.config.sync_on_append {
            file.sync_all()?;
        }

        index.upsert(entity.id(), offset);
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Indexed offset for `id`, if any record (tombstones included) exists
    pub fn indexed_offset(&self, id: Uuid) -> Option<u64> {
        self.index.lock().offset(&id)
    }

    /// Number of ids currently indexed (tombstoned ids included)
    pub fn indexed_ids(&self) -> usize {
        self.index.lock().len()
    }
}
