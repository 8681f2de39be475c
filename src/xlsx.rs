/// Spreadsheet codec for the record table
///
/// This module handles:
/// - Decoding the first worksheet of a workbook into a `RecordTable`
/// - Encoding a table to xlsx bytes in the canonical column order
/// - Lenient date-cell handling (bad dates become missing, never errors)
///
/// Columns are matched by header name on the way in; the canonical order in
/// `record::COLUMNS` is enforced only on the way out.
use crate::error::StoreError;
use crate::record::{COLUMNS, RecordTable, RepairStatus, ServiceRecord, WarrantyStatus};
use calamine::{Data, DataType, Range, Reader, Xlsx};
use chrono::NaiveDate;
use log::debug;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::HashMap;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::str::FromStr;

/// Decode the workbook at `path` into a table.
pub fn read_table_from_path(path: &Path) -> Result<RecordTable, StoreError> {
    let file = std::fs::File::open(path)?;
    let mut workbook =
        Xlsx::new(BufReader::new(file)).map_err(|e| StoreError::Parse(format!("{}: {}", path.display(), e)))?;
    decode_first_sheet(&mut workbook)
}

/// Decode an in-memory workbook into a table.
pub fn read_table_from_bytes(bytes: &[u8]) -> Result<RecordTable, StoreError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes)).map_err(|e| StoreError::Parse(e.to_string()))?;
    decode_first_sheet(&mut workbook)
}

/// Encode a table to xlsx bytes: header row in canonical order, one row per
/// record, dates as native xlsx date cells formatted `yyyy-mm-dd`.
pub fn write_table_to_bytes(table: &RecordTable) -> Result<Vec<u8>, StoreError> {
    let mut workbook = Workbook::new();
    encode_sheet(workbook.add_worksheet(), table)?;
    workbook.save_to_buffer().map_err(|e| StoreError::Render(e.to_string()))
}

fn decode_first_sheet<R>(workbook: &mut Xlsx<R>) -> Result<RecordTable, StoreError>
where
    R: std::io::Read + std::io::Seek,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StoreError::Parse("workbook has no worksheets".to_string()))?
        .map_err(|e| StoreError::Parse(e.to_string()))?;
    decode_range(&range)
}

fn decode_range(range: &Range<Data>) -> Result<RecordTable, StoreError> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(RecordTable::new());
    };

    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| cell.get_string().map(|name| (name.trim().to_string(), i)))
        .collect();
    debug!("Decoding worksheet with columns {:?}", columns.keys().collect::<Vec<_>>());

    let mut table = RecordTable::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        // Spreadsheet rows are 1-based and the header occupies row 1.
        let row_number = i + 2;
        table.push(decode_row(row, &columns, row_number, table.len())?);
    }
    Ok(table)
}

fn decode_row(
    row: &[Data],
    columns: &HashMap<String, usize>,
    row_number: usize,
    decoded_so_far: usize,
) -> Result<ServiceRecord, StoreError> {
    let cell = |name: &str| columns.get(name).and_then(|&i| row.get(i));
    let text = |name: &str| cell(name).map(cell_text).unwrap_or_default();
    let date = |name: &str| cell(name).and_then(cell_date);

    let warranty_raw = text("Warranty Status");
    let warranty = WarrantyStatus::from_str(&warranty_raw)
        .map_err(|_| StoreError::Parse(format!("row {}: unknown warranty status '{}'", row_number, warranty_raw)))?;
    let status_raw = text("Status");
    let status = RepairStatus::from_str(&status_raw)
        .map_err(|_| StoreError::Parse(format!("row {}: unknown repair status '{}'", row_number, status_raw)))?;

    Ok(ServiceRecord {
        // A missing or non-numeric "No" cell falls back to the row position.
        no: cell("No").and_then(cell_number).unwrap_or(decoded_so_far as u32 + 1),
        customer: text("Customer Name"),
        item: text("Item"),
        serial: text("Serial Number"),
        part_number: text("CN/PN"),
        warranty,
        status,
        date_in: date("Date In"),
        service_date: date("Service Date"),
        date_out: date("Date Out"),
        problem: text("Problem"),
        location: text("Service Location"),
    })
}

fn encode_sheet(sheet: &mut Worksheet, table: &RecordTable) -> Result<(), StoreError> {
    let xe = |e: rust_xlsxwriter::XlsxError| StoreError::Render(e.to_string());

    sheet.set_name("Service Data").map_err(xe)?;
    let bold = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (c, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, c as u16, *name, &bold).map_err(xe)?;
    }

    for (r, record) in table.records().iter().enumerate() {
        let row = r as u32 + 1;
        sheet.write_number(row, 0, record.no as f64).map_err(xe)?;
        sheet.write_string(row, 1, &record.customer).map_err(xe)?;
        sheet.write_string(row, 2, &record.item).map_err(xe)?;
        sheet.write_string(row, 3, &record.serial).map_err(xe)?;
        sheet.write_string(row, 4, &record.part_number).map_err(xe)?;
        sheet.write_string(row, 5, record.warranty.as_str()).map_err(xe)?;
        sheet.write_string(row, 6, record.status.as_str()).map_err(xe)?;
        write_date(sheet, row, 7, record.date_in, &date_format)?;
        write_date(sheet, row, 8, record.service_date, &date_format)?;
        write_date(sheet, row, 9, record.date_out, &date_format)?;
        sheet.write_string(row, 10, &record.problem).map_err(xe)?;
        sheet.write_string(row, 11, &record.location).map_err(xe)?;
    }
    Ok(())
}

fn write_date(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    date: Option<NaiveDate>,
    format: &Format,
) -> Result<(), StoreError> {
    if let Some(d) = date {
        sheet.write_datetime_with_format(row, col, &d, format).map_err(|e| StoreError::Render(e.to_string()))?;
    }
    Ok(())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<u32> {
    match cell {
        Data::Float(f) if *f >= 0.0 => Some(*f as u32),
        Data::Int(i) if *i >= 0 => Some(*i as u32),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_date(),
        Data::String(s) => parse_date_lenient(s),
        _ => None,
    }
}

/// Parse a date out of free text. Anything unrecognised is a missing date,
/// not an error.
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y"];
    FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
