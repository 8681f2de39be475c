use crate::record::{RecordFilter, RepairStatus, WarrantyStatus};
use crate::report::ReportKind;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "repair-desk")]
#[command(about = "Spreadsheet-backed ledger for equipment service tickets")]
#[command(version)]
pub struct CliArgs {
    /// Path to the backing xlsx file (default: $REPAIR_DESK_DATA, then the
    /// platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show records, optionally filtered
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum rows to print
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Add a new service record
    Add {
        /// Customer name
        #[arg(long)]
        customer: String,

        /// Item model
        #[arg(long)]
        item: String,

        /// Serial number
        #[arg(long)]
        serial: String,

        /// CN/PN reference code
        #[arg(long, default_value = "", value_name = "CODE")]
        part_number: String,

        /// Warranty status: Yes, No, or Registered
        #[arg(long)]
        warranty: WarrantyStatus,

        /// Repair status: Done, "In Repair", or Received
        #[arg(long)]
        status: RepairStatus,

        /// Date the item came in (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date_in: Option<NaiveDate>,

        /// Date the item was serviced (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        service_date: Option<NaiveDate>,

        /// Date the item went out (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date_out: Option<NaiveDate>,

        /// Problem description
        #[arg(long)]
        problem: String,

        /// Service location
        #[arg(long, default_value = "")]
        location: String,
    },

    /// Update fields on an existing record; omitted flags keep prior values
    Update {
        /// Zero-based row index of the record to update
        #[arg(long)]
        index: usize,

        #[arg(long)]
        customer: Option<String>,

        #[arg(long)]
        item: Option<String>,

        #[arg(long)]
        serial: Option<String>,

        #[arg(long, value_name = "CODE")]
        part_number: Option<String>,

        /// Warranty status: Yes, No, or Registered
        #[arg(long)]
        warranty: Option<WarrantyStatus>,

        /// Repair status: Done, "In Repair", or Received
        #[arg(long)]
        status: Option<RepairStatus>,

        #[arg(long, value_name = "DATE")]
        date_in: Option<NaiveDate>,

        #[arg(long, value_name = "DATE")]
        service_date: Option<NaiveDate>,

        #[arg(long, value_name = "DATE")]
        date_out: Option<NaiveDate>,

        #[arg(long)]
        problem: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Print dashboard statistics
    Stats {
        /// Entries in each top-N list
        #[arg(long, default_value = "5")]
        top: usize,

        /// Emit the full statistics structure as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the table (optionally filtered) to an xlsx file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Destination path (default: exports/service_report_<date>.xlsx)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Generate a PDF report
    Report {
        /// Report variant: summary, detailed, or warranty
        #[arg(long, default_value = "summary")]
        kind: ReportKind,

        /// Destination path (default: exports/service_report_<kind>_<stamp>.pdf)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Replace the whole table with the contents of another workbook
    Import {
        /// Workbook to import
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Apply the replacement; without this flag only the preview is shown
        #[arg(long)]
        confirm: bool,

        /// Preview rows to print
        #[arg(long, default_value = "5")]
        preview: usize,
    },
}

/// Filter criteria shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive substring match on the customer name
    #[arg(long)]
    pub customer: Option<String>,

    /// Case-insensitive substring match on the item model
    #[arg(long)]
    pub item: Option<String>,

    /// Case-insensitive substring match on the serial number
    #[arg(long)]
    pub serial: Option<String>,

    /// Exact repair status: Done, "In Repair", or Received
    #[arg(long)]
    pub status: Option<RepairStatus>,

    /// Exact warranty status: Yes, No, or Registered
    #[arg(long)]
    pub warranty: Option<WarrantyStatus>,

    /// Keep records with Date In on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Keep records with Date In on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            customer: self.customer.clone(),
            item: self.item.clone(),
            serial: self.serial.clone(),
            status: self.status,
            warranty: self.warranty,
            date_in_from: self.from,
            date_in_to: self.to,
        }
    }
}
