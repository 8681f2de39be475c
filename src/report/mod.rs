//! Report rendering module.
//!
//! Turns a table snapshot into a paginated PDF document in three variants.
//!
//! # Module Organization
//!
//! - `layout` - pure page layout: running cursor, break threshold, per-page
//!   header and footer chrome
//! - `render` - the summary / detailed / warranty variants
//! - `pdf`    - layout to PDF bytes (printpdf, builtin Helvetica)

pub mod layout;
mod pdf;
mod render;

pub use pdf::layout_to_pdf_bytes;
pub use render::{ReportKind, render};

use crate::error::StoreError;
use crate::record::RecordTable;
use chrono::NaiveDateTime;

/// Render one report variant straight to PDF bytes.
pub fn generate_pdf(table: &RecordTable, kind: ReportKind, generated_at: NaiveDateTime) -> Result<Vec<u8>, StoreError> {
    let layout = render(table, kind, generated_at);
    layout_to_pdf_bytes(&layout, "Service Report")
}
