/// repair-desk: a single-user service ticket ledger
///
/// The crate is split into three layers:
/// - `store` + `xlsx`: durable persistence of the record table in a
///   spreadsheet file, with atomic replace-on-write
/// - `stats`: trend, distribution, and top-N aggregation over a table
///   snapshot
/// - `report`: paginated PDF rendering of summary, detailed, and
///   warranty reports
///
/// The binary in `main.rs` wires these together behind a clap CLI.
pub mod cli;
pub mod config;
pub mod error;
pub mod record;
pub mod report;
pub mod stats;
pub mod store;
pub mod ui;
pub mod xlsx;

pub use error::StoreError;
pub use record::{RecordFilter, RecordPatch, RecordTable, RepairStatus, ServiceRecord, WarrantyStatus};
pub use store::RecordStore;
