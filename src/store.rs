/// Record store: durable persistence of the service table
///
/// This module handles:
/// - Loading the backing xlsx file into a `RecordTable` snapshot
/// - Insert / update / wholesale replace, persisted atomically
/// - In-memory export and archive-then-replace import
///
/// One file is the source of truth and every operation is read-modify-write
/// against it with no lock. Concurrent writers race and the last write wins;
/// that limitation is accepted for a single-operator tool and demonstrated by
/// the lost-update test in `store_test.rs`. Nothing is cached between calls,
/// so a snapshot can never go stale against the file.
use crate::error::StoreError;
use crate::record::{RecordPatch, RecordTable, ServiceRecord};
use crate::xlsx;
use chrono::Local;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct RecordStore {
    data_file: PathBuf,
    archive_dir: PathBuf,
}

impl RecordStore {
    pub fn new(data_file: PathBuf, archive_dir: PathBuf) -> Self {
        RecordStore { data_file, archive_dir }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Read the backing file. An absent file means "no data yet" and returns
    /// `Ok(None)`; a present but unreadable file is an error.
    pub fn load(&self) -> Result<Option<RecordTable>, StoreError> {
        if !self.data_file.exists() {
            debug!("Data file {} does not exist yet", self.data_file.display());
            return Ok(None);
        }
        let table = xlsx::read_table_from_path(&self.data_file)?;
        debug!("Loaded {} records from {}", table.len(), self.data_file.display());
        Ok(Some(table))
    }

    /// Overwrite the backing file wholesale. No merge semantics.
    pub fn replace(&self, table: &RecordTable) -> Result<(), StoreError> {
        self.persist(table)
    }

    /// Validate, assign the next sequence number, append, persist.
    /// Returns the assigned number. The `no` on the argument is ignored.
    pub fn insert(&self, record: ServiceRecord) -> Result<u32, StoreError> {
        record.validate()?;
        let mut table = self.load()?.unwrap_or_default();
        let mut record = record;
        record.no = table.len() as u32 + 1;
        let assigned = record.no;
        table.push(record);
        self.persist(&table)?;
        Ok(assigned)
    }

    /// Overwrite only the fields supplied in `patch` on the record at `index`.
    /// The patched record is re-validated before anything is written.
    pub fn update(&self, index: usize, patch: &RecordPatch) -> Result<(), StoreError> {
        let mut table = self.load()?.unwrap_or_default();
        let record = table.get_mut(index).ok_or(StoreError::IndexOutOfRange(index))?;
        patch.apply(record);
        record.validate()?;
        self.persist(&table)
    }

    /// Serialize a snapshot to xlsx bytes without touching the backing file.
    pub fn export_snapshot(&self, table: &RecordTable) -> Result<Vec<u8>, StoreError> {
        xlsx::write_table_to_bytes(table)
    }

    /// First `rows` records of an import candidate, for preview display.
    /// Parse failures abort here, before anything is replaced.
    pub fn import_preview(&self, source: &Path, rows: usize) -> Result<RecordTable, StoreError> {
        let table = xlsx::read_table_from_path(source)?;
        Ok(RecordTable::from_records(table.records().iter().take(rows).cloned().collect()))
    }

    /// Archive a timestamped copy of `source` and replace the whole table
    /// with its contents. Returns the imported record count.
    pub fn import_replace(&self, source: &Path) -> Result<usize, StoreError> {
        let table = xlsx::read_table_from_path(source)?;
        fs::create_dir_all(&self.archive_dir)?;
        let archive_path = self.archive_dir.join(format!("import_{}.xlsx", Local::now().format("%Y%m%d_%H%M%S")));
        fs::copy(source, &archive_path)?;
        debug!("Archived import to {}", archive_path.display());
        self.replace(&table)?;
        Ok(table.len())
    }

    /// Write-then-rename so a failed write never leaves a partial file where
    /// the next `load` would see it.
    fn persist(&self, table: &RecordTable) -> Result<(), StoreError> {
        let bytes = xlsx::write_table_to_bytes(table)?;
        let dir = self.data_file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&bytes)?;
        staged.persist(&self.data_file).map_err(|e| StoreError::Io(e.error))?;
        debug!("Persisted {} records to {}", table.len(), self.data_file.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
