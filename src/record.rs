/// Core data structures for the service ledger
///
/// This module defines the primary types used throughout repair-desk
/// for representing service tickets, the record table, and filters.
use crate::error::StoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical export column order. Loading matches columns by header name;
/// every export writes exactly this order.
pub const COLUMNS: [&str; 12] = [
    "No",
    "Customer Name",
    "Item",
    "Serial Number",
    "CN/PN",
    "Warranty Status",
    "Status",
    "Date In",
    "Service Date",
    "Date Out",
    "Problem",
    "Service Location",
];

/// Warranty state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarrantyStatus {
    Yes,
    No,
    Registered,
}

impl WarrantyStatus {
    pub const ALL: [WarrantyStatus; 3] = [WarrantyStatus::Yes, WarrantyStatus::No, WarrantyStatus::Registered];

    pub fn as_str(&self) -> &'static str {
        match self {
            WarrantyStatus::Yes => "Yes",
            WarrantyStatus::No => "No",
            WarrantyStatus::Registered => "Registered",
        }
    }
}

impl FromStr for WarrantyStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, StoreError> {
        match s.trim() {
            "Yes" => Ok(WarrantyStatus::Yes),
            "No" => Ok(WarrantyStatus::No),
            "Registered" => Ok(WarrantyStatus::Registered),
            other => Err(StoreError::Validation(format!(
                "unknown warranty status '{}' (expected Yes, No, or Registered)",
                other
            ))),
        }
    }
}

impl fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repair progress of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepairStatus {
    Done,
    InRepair,
    Received,
}

impl RepairStatus {
    pub const ALL: [RepairStatus; 3] = [RepairStatus::Done, RepairStatus::InRepair, RepairStatus::Received];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::Done => "Done",
            RepairStatus::InRepair => "In Repair",
            RepairStatus::Received => "Received",
        }
    }
}

impl FromStr for RepairStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, StoreError> {
        match s.trim() {
            "Done" => Ok(RepairStatus::Done),
            "In Repair" => Ok(RepairStatus::InRepair),
            "Received" => Ok(RepairStatus::Received),
            other => Err(StoreError::Validation(format!(
                "unknown repair status '{}' (expected Done, In Repair, or Received)",
                other
            ))),
        }
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One repair ticket
///
/// `no` is the sequence number, assigned once at insert time and never
/// renumbered afterwards. Date fields are `None` when the source cell was
/// empty or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub no: u32,
    pub customer: String,
    pub item: String,
    pub serial: String,
    /// CN/PN reference code, may be empty
    pub part_number: String,
    pub warranty: WarrantyStatus,
    pub status: RepairStatus,
    pub date_in: Option<NaiveDate>,
    pub service_date: Option<NaiveDate>,
    pub date_out: Option<NaiveDate>,
    pub problem: String,
    /// Optional service location
    pub location: String,
}

impl ServiceRecord {
    /// Reject the record if any required field is empty.
    ///
    /// Enumerated fields are already constrained by their types; string input
    /// for them is rejected at the parsing boundary (`FromStr`).
    pub fn validate(&self) -> Result<(), StoreError> {
        let required = [
            ("Customer Name", &self.customer),
            ("Item", &self.item),
            ("Serial Number", &self.serial),
            ("Problem", &self.problem),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(StoreError::Validation(format!("required field '{}' is empty", name)));
            }
        }
        Ok(())
    }
}

/// Partial update for a single record. `None` fields keep their prior value.
///
/// Date fields use a nested option: `Some(None)` clears a date,
/// `Some(Some(d))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub customer: Option<String>,
    pub item: Option<String>,
    pub serial: Option<String>,
    pub part_number: Option<String>,
    pub warranty: Option<WarrantyStatus>,
    pub status: Option<RepairStatus>,
    pub date_in: Option<Option<NaiveDate>>,
    pub service_date: Option<Option<NaiveDate>>,
    pub date_out: Option<Option<NaiveDate>>,
    pub problem: Option<String>,
    pub location: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == RecordPatch::default()
    }

    /// Overwrite only the supplied fields. The sequence number is never
    /// touched by a patch.
    pub fn apply(&self, record: &mut ServiceRecord) {
        if let Some(ref v) = self.customer {
            record.customer = v.clone();
        }
        if let Some(ref v) = self.item {
            record.item = v.clone();
        }
        if let Some(ref v) = self.serial {
            record.serial = v.clone();
        }
        if let Some(ref v) = self.part_number {
            record.part_number = v.clone();
        }
        if let Some(v) = self.warranty {
            record.warranty = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.date_in {
            record.date_in = v;
        }
        if let Some(v) = self.service_date {
            record.service_date = v;
        }
        if let Some(v) = self.date_out {
            record.date_out = v;
        }
        if let Some(ref v) = self.problem {
            record.problem = v.clone();
        }
        if let Some(ref v) = self.location {
            record.location = v.clone();
        }
    }
}

/// Ordered table of service records; insertion order is row order in the
/// backing file. The store owns the canonical copy and hands out clones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    records: Vec<ServiceRecord>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ServiceRecord>) -> Self {
        RecordTable { records }
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ServiceRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ServiceRecord> {
        self.records.get_mut(index)
    }

    pub fn push(&mut self, record: ServiceRecord) {
        self.records.push(record);
    }

    /// Copy of the table containing only records accepted by `filter`.
    /// Sequence numbers are preserved, never renumbered.
    pub fn filtered(&self, filter: &RecordFilter) -> RecordTable {
        RecordTable { records: self.records.iter().filter(|r| filter.matches(r)).cloned().collect() }
    }
}

/// Read-side filter over the table
///
/// Text criteria are case-insensitive substring matches; status criteria are
/// exact; the date range applies to Date In and excludes records with a
/// missing Date In when either bound is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub customer: Option<String>,
    pub item: Option<String>,
    pub serial: Option<String>,
    pub status: Option<RepairStatus>,
    pub warranty: Option<WarrantyStatus>,
    pub date_in_from: Option<NaiveDate>,
    pub date_in_to: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        *self == RecordFilter::default()
    }

    pub fn matches(&self, record: &ServiceRecord) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if let Some(ref needle) = self.customer
            && !contains_ci(&record.customer, needle)
        {
            return false;
        }
        if let Some(ref needle) = self.item
            && !contains_ci(&record.item, needle)
        {
            return false;
        }
        if let Some(ref needle) = self.serial
            && !contains_ci(&record.serial, needle)
        {
            return false;
        }
        if let Some(status) = self.status
            && record.status != status
        {
            return false;
        }
        if let Some(warranty) = self.warranty
            && record.warranty != warranty
        {
            return false;
        }
        if self.date_in_from.is_some() || self.date_in_to.is_some() {
            let Some(date_in) = record.date_in else {
                return false;
            };
            if let Some(from) = self.date_in_from
                && date_in < from
            {
                return false;
            }
            if let Some(to) = self.date_in_to
                && date_in > to
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;
