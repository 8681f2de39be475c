/// Error kinds for the record store and its consumers
///
/// An absent backing file is deliberately not an error: `RecordStore::load`
/// returns `Ok(None)` and the statistics engine produces the empty dashboard.
/// Unparseable date cells are also not errors; they degrade to a missing date.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file (or an export destination) could not be read or written.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The spreadsheet exists but could not be decoded. The operation aborts
    /// without touching the backing file.
    #[error("could not parse spreadsheet: {0}")]
    Parse(String),

    /// A required field is empty or an enumerated field is outside its allowed
    /// set. Raised before any persistence attempt.
    #[error("invalid record: {0}")]
    Validation(String),

    /// An update targeted a row that does not exist.
    #[error("no record at index {0}")]
    IndexOutOfRange(usize),

    /// A spreadsheet or PDF artifact could not be generated.
    #[error("could not generate document: {0}")]
    Render(String),
}
