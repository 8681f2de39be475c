//! PDF emission for computed layouts.
//!
//! Text uses the builtin Helvetica faces, so no font files ship with the
//! crate. Layout coordinates are top-down; PDF user space is bottom-up, so
//! the y axis is flipped here and nowhere else.

use super::layout::{CellBox, DocumentLayout, PAGE_HEIGHT, PAGE_WIDTH, TextSpan};
use crate::error::StoreError;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb};

const PT_TO_MM: f32 = 0.352_778;

/// Emit a finished layout as PDF bytes.
pub fn layout_to_pdf_bytes(layout: &DocumentLayout, title: &str) -> Result<Vec<u8>, StoreError> {
    let (doc, first_page, first_layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
    let regular =
        doc.add_builtin_font(BuiltinFont::Helvetica).map_err(|e| StoreError::Render(e.to_string()))?;
    let bold =
        doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(|e| StoreError::Render(e.to_string()))?;

    for (i, page) in layout.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            doc.get_page(page_index).get_layer(layer_index)
        };

        layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        layer.set_outline_thickness(0.3);
        for cell in &page.boxes {
            draw_box(&layer, cell);
        }
        for span in &page.texts {
            draw_text(&layer, span, &regular, &bold);
        }
    }

    doc.save_to_bytes().map_err(|e| StoreError::Render(e.to_string()))
}

fn draw_box(layer: &PdfLayerReference, cell: &CellBox) {
    let top = PAGE_HEIGHT - cell.y;
    let bottom = top - cell.height;
    let points = vec![
        (Point::new(Mm(cell.x), Mm(top)), false),
        (Point::new(Mm(cell.x + cell.width), Mm(top)), false),
        (Point::new(Mm(cell.x + cell.width), Mm(bottom)), false),
        (Point::new(Mm(cell.x), Mm(bottom)), false),
    ];
    layer.add_line(Line { points, is_closed: true });
}

fn draw_text(layer: &PdfLayerReference, span: &TextSpan, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    let font = if span.bold { bold } else { regular };
    // Baseline sits one glyph height below the top of the line.
    let baseline = PAGE_HEIGHT - span.y - span.size * PT_TO_MM;
    layer.use_text(span.text.clone(), span.size, Mm(span.x), Mm(baseline), font);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordTable;
    use crate::report::render::{ReportKind, render};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_table_still_produces_a_pdf() {
        let generated = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let layout = render(&RecordTable::new(), ReportKind::Summary, generated);
        let bytes = layout_to_pdf_bytes(&layout, "Service Report").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
