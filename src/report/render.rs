//! The three report variants.
//!
//! Each variant builds a `DocumentLayout` from a table snapshot; the `pdf`
//! module turns layouts into bytes. Rendering takes the generation timestamp
//! as an argument so output is deterministic for a fixed input.

use super::layout::{self, DocHeader, DocumentLayout, LEFT_MARGIN, LINE_HEIGHT, LayoutBuilder};
use crate::error::StoreError;
use crate::record::{RecordTable, RepairStatus, ServiceRecord, WarrantyStatus};
use crate::stats::{self, GroupField};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::str::FromStr;

/// Detailed-table column widths in mm.
const DETAIL_WIDTHS: [f32; 6] = [40.0, 30.0, 30.0, 20.0, 20.0, 40.0];
const DETAIL_HEADERS: [&str; 6] = ["Customer", "Item", "Serial", "Status", "Warranty", "Problem"];
const HEADER_ROW_HEIGHT: f32 = 10.0;
const DETAIL_FONT_SIZE: f32 = 8.0;
/// Height of one wrapped line inside a detail cell.
const DETAIL_LINE_HEIGHT: f32 = 5.0;
const CELL_PADDING: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    Detailed,
    Warranty,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Summary => "Summary Report",
            ReportKind::Detailed => "Detailed Report",
            ReportKind::Warranty => "Warranty Report",
        }
    }

    /// Filename fragment for export artifacts.
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Summary => "summary",
            ReportKind::Detailed => "detailed",
            ReportKind::Warranty => "warranty",
        }
    }
}

impl FromStr for ReportKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, StoreError> {
        match s.trim().to_lowercase().as_str() {
            "summary" => Ok(ReportKind::Summary),
            "detailed" => Ok(ReportKind::Detailed),
            "warranty" => Ok(ReportKind::Warranty),
            other => Err(StoreError::Validation(format!(
                "unknown report kind '{}' (expected summary, detailed, or warranty)",
                other
            ))),
        }
    }
}

/// Build the page layout for one report variant over a table snapshot.
pub fn render(table: &RecordTable, kind: ReportKind, generated_at: NaiveDateTime) -> DocumentLayout {
    let header = DocHeader {
        title: "Service Report".to_string(),
        report_type: kind.title().to_string(),
        generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    let mut doc = LayoutBuilder::new(header);
    match kind {
        ReportKind::Summary => render_summary(&mut doc, table),
        ReportKind::Detailed => render_detailed(&mut doc, table),
        ReportKind::Warranty => render_warranty(&mut doc, table),
    }
    doc.finish()
}

fn render_summary(doc: &mut LayoutBuilder, table: &RecordTable) {
    doc.line("Summary Statistics", 12.0, true);
    doc.line(&format!("Total Records: {}", table.len()), 10.0, false);

    doc.line("By Status:", 10.0, false);
    for status in RepairStatus::ALL {
        let count = table.records().iter().filter(|r| r.status == status).count();
        if count > 0 {
            doc.indented_line(20.0, &format!("- {}: {}", status, count), 10.0, false);
        }
    }

    doc.line("By Warranty:", 10.0, false);
    for warranty in WarrantyStatus::ALL {
        let count = table.records().iter().filter(|r| r.warranty == warranty).count();
        if count > 0 {
            doc.indented_line(20.0, &format!("- {}: {}", warranty, count), 10.0, false);
        }
    }

    doc.spacer(LINE_HEIGHT);
    doc.line("Top 10 Customers by Service Requests:", 10.0, false);
    for (i, entry) in stats::top_n(table, GroupField::Customer, 10).iter().enumerate() {
        doc.line(&format!("{}. {}: {}", i + 1, entry.value, entry.count), 10.0, false);
    }
}

fn render_detailed(doc: &mut LayoutBuilder, table: &RecordTable) {
    put_detail_header(doc);
    for record in table.records() {
        let cells = [
            record.customer.as_str(),
            record.item.as_str(),
            record.serial.as_str(),
            record.status.as_str(),
            record.warranty.as_str(),
            record.problem.as_str(),
        ];

        // Wrap every cell to its column; the tallest cell sets the row height.
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(DETAIL_WIDTHS)
            .map(|(cell, width)| {
                layout::wrap_to_chars(cell, layout::max_chars_for_width(DETAIL_FONT_SIZE, width - 2.0 * CELL_PADDING))
            })
            .collect();
        let line_count = wrapped.iter().map(|lines| lines.len()).max().unwrap_or(1);
        let row_height = (line_count as f32 * DETAIL_LINE_HEIGHT).max(HEADER_ROW_HEIGHT);

        let mut x = LEFT_MARGIN;
        for (col, lines) in wrapped.iter().enumerate() {
            doc.put_box(x, DETAIL_WIDTHS[col], row_height);
            for (i, line) in lines.iter().enumerate() {
                doc.put_text_at(
                    x + CELL_PADDING,
                    doc.cursor() + CELL_PADDING + i as f32 * DETAIL_LINE_HEIGHT,
                    line,
                    DETAIL_FONT_SIZE,
                    false,
                );
            }
            x += DETAIL_WIDTHS[col];
        }
        doc.advance(row_height);

        if doc.break_page_if_past_threshold() {
            put_detail_header(doc);
        }
    }
}

fn put_detail_header(doc: &mut LayoutBuilder) {
    let mut x = LEFT_MARGIN;
    for (title, width) in DETAIL_HEADERS.iter().zip(DETAIL_WIDTHS) {
        doc.put_box(x, width, HEADER_ROW_HEIGHT);
        let text_width = layout::text_width_mm(title, 10.0);
        doc.put_text_at(x + (width - text_width) / 2.0, doc.cursor() + 2.0, title, 10.0, true);
        x += width;
    }
    doc.advance(HEADER_ROW_HEIGHT);
}

fn render_warranty(doc: &mut LayoutBuilder, table: &RecordTable) {
    let covered: Vec<&ServiceRecord> =
        table.records().iter().filter(|r| r.warranty == WarrantyStatus::Yes).collect();
    doc.line(&format!("Warranty Items: {}", covered.len()), 10.0, false);

    // Group by customer in first-seen order.
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ServiceRecord>> = HashMap::new();
    for record in &covered {
        let customer = record.customer.as_str();
        if !groups.contains_key(customer) {
            order.push(customer);
        }
        groups.entry(customer).or_default().push(record);
    }

    for customer in order {
        doc.line(&format!("Customer: {}", customer), 10.0, true);
        for record in &groups[customer] {
            let service_date =
                record.service_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "N/A".to_string());
            doc.indented_line(20.0, &format!("Item: {} | Serial: {}", record.item, record.serial), 8.0, false);
            doc.indented_line(20.0, &format!("Problem: {}", record.problem), 8.0, false);
            doc.indented_line(20.0, &format!("Service Date: {}", service_date), 8.0, false);
            doc.spacer(5.0);
        }
    }
}
