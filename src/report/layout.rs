//! Page layout engine for the PDF reports.
//!
//! Layout is computed separately from PDF emission so pagination can be
//! asserted in tests without parsing PDF bytes. Coordinates are millimetres
//! from the top-left corner of an A4 page; the `pdf` module flips the y axis
//! when emitting.

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
/// Once the running cursor passes this many mm from the top, the next block
/// starts on a fresh page.
pub const BREAK_THRESHOLD: f32 = 260.0;
pub const TOP_MARGIN: f32 = 10.0;
pub const LEFT_MARGIN: f32 = 10.0;
/// Default advance for a line of body text.
pub const LINE_HEIGHT: f32 = 10.0;
const FOOTER_Y: f32 = PAGE_HEIGHT - 15.0;

const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f32 = 0.5;

/// One placed run of text. `y` is the top of the line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub text: String,
}

/// A stroked rectangle (table cell border).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub texts: Vec<TextSpan>,
    pub boxes: Vec<CellBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

/// Header chrome repeated at the top of every page.
#[derive(Debug, Clone)]
pub struct DocHeader {
    pub title: String,
    pub report_type: String,
    pub generated_at: String,
}

/// Builds a multi-page layout with a running vertical cursor.
///
/// Page breaks are cursor-threshold based, never a fixed rows-per-page count:
/// callers check `break_page_if_past_threshold` after emitting blocks of
/// variable height.
pub struct LayoutBuilder {
    header: DocHeader,
    pages: Vec<PageLayout>,
    cursor: f32,
}

impl LayoutBuilder {
    pub fn new(header: DocHeader) -> Self {
        let mut builder = LayoutBuilder { header, pages: Vec::new(), cursor: 0.0 };
        builder.start_page();
        builder
    }

    /// Current cursor position, mm from the page top.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// A line of text at the left margin; advances the cursor one line.
    pub fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.indented_line(0.0, text, size, bold);
    }

    /// A line of text indented from the left margin.
    pub fn indented_line(&mut self, indent: f32, text: &str, size: f32, bold: bool) {
        self.break_page_if_past_threshold();
        self.put_text_at(LEFT_MARGIN + indent, self.cursor, text, size, bold);
        self.cursor += LINE_HEIGHT;
    }

    /// Text centred horizontally at the current cursor; advances one line.
    pub fn centered_line(&mut self, text: &str, size: f32, bold: bool) {
        let x = (PAGE_WIDTH - text_width_mm(text, size)) / 2.0;
        self.put_text_at(x, self.cursor, text, size, bold);
        self.cursor += LINE_HEIGHT;
    }

    /// Absolute text placement; does not move the cursor.
    pub fn put_text_at(&mut self, x: f32, y: f32, text: &str, size: f32, bold: bool) {
        self.current_page().texts.push(TextSpan { x, y, size, bold, text: text.to_string() });
    }

    /// A cell border at the current cursor; does not move the cursor.
    pub fn put_box(&mut self, x: f32, width: f32, height: f32) {
        let y = self.cursor;
        self.current_page().boxes.push(CellBox { x, y, width, height });
    }

    pub fn advance(&mut self, height: f32) {
        self.cursor += height;
    }

    pub fn spacer(&mut self, height: f32) {
        self.cursor += height;
    }

    /// Start a fresh page if the cursor has crossed the break threshold.
    /// Returns true when a break happened, so callers can repeat table
    /// headers.
    pub fn break_page_if_past_threshold(&mut self) -> bool {
        if self.cursor > BREAK_THRESHOLD {
            self.start_page();
            true
        } else {
            false
        }
    }

    /// Number the pages and return the finished layout. The footer can only
    /// be placed here, once the total page count is known.
    pub fn finish(mut self) -> DocumentLayout {
        let total = self.pages.len();
        for (i, page) in self.pages.iter_mut().enumerate() {
            let text = format!("Page {}/{}", i + 1, total);
            let x = (PAGE_WIDTH - text_width_mm(&text, 8.0)) / 2.0;
            page.texts.push(TextSpan { x, y: FOOTER_Y, size: 8.0, bold: false, text });
        }
        DocumentLayout { pages: self.pages }
    }

    fn current_page(&mut self) -> &mut PageLayout {
        self.pages.last_mut().expect("builder always holds at least one page")
    }

    fn start_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.cursor = TOP_MARGIN;

        let title = self.header.title.clone();
        let report_type = format!("Report Type: {}", self.header.report_type);
        let generated = format!("Generated on: {}", self.header.generated_at);
        self.centered_line(&title, 15.0, true);
        self.spacer(5.0);
        self.line(&report_type, 10.0, false);
        self.line(&generated, 10.0, false);
        self.spacer(5.0);
    }
}

/// Estimated width of `text` in mm, from the average glyph width. Good
/// enough for centring and column wrapping; exact metrics are not needed
/// for layout decisions.
pub fn text_width_mm(text: &str, size: f32) -> f32 {
    use unicode_width::UnicodeWidthStr;
    text.width() as f32 * size * GLYPH_WIDTH_FACTOR * PT_TO_MM
}

/// How many average-width glyphs of `size` fit in `width` mm.
pub fn max_chars_for_width(size: f32, width: f32) -> usize {
    ((width / (size * GLYPH_WIDTH_FACTOR * PT_TO_MM)) as usize).max(1)
}

/// Greedy word wrap to a character budget; words longer than the budget are
/// hard-split. Always yields at least one (possibly empty) line.
pub fn wrap_to_chars(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        for piece in split_overlong(word, max_chars) {
            let piece_len = piece.chars().count();
            if current_len == 0 {
                current = piece;
                current_len = piece_len;
            } else if current_len + 1 + piece_len <= max_chars {
                current.push(' ');
                current.push_str(&piece);
                current_len += 1 + piece_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current = piece;
                current_len = piece_len;
            }
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn split_overlong(word: &str, max_chars: usize) -> Vec<String> {
    if word.chars().count() <= max_chars {
        return vec![word.to_string()];
    }
    word.chars().collect::<Vec<_>>().chunks(max_chars).map(|chunk| chunk.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> DocHeader {
        DocHeader {
            title: "Service Report".to_string(),
            report_type: "Summary Report".to_string(),
            generated_at: "2024-03-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_every_page_gets_header_and_footer() {
        let mut builder = LayoutBuilder::new(header());
        for i in 0..120 {
            builder.line(&format!("line {}", i), 10.0, false);
        }
        let doc = builder.finish();
        assert!(doc.pages.len() > 1);

        for (i, page) in doc.pages.iter().enumerate() {
            assert!(page.texts.iter().any(|t| t.text == "Service Report" && t.bold));
            assert!(page.texts.iter().any(|t| t.text.starts_with("Generated on: ")));
            assert!(page.texts.iter().any(|t| t.text == format!("Page {}/{}", i + 1, doc.pages.len())));
        }
    }

    #[test]
    fn test_break_only_past_threshold() {
        let mut builder = LayoutBuilder::new(header());
        assert!(!builder.break_page_if_past_threshold());
        builder.advance(BREAK_THRESHOLD);
        assert!(builder.break_page_if_past_threshold());
        assert_eq!(builder.page_count(), 2);
        // Fresh page resets the cursor below the page header.
        assert!(builder.cursor() < BREAK_THRESHOLD);
    }

    #[test]
    fn test_wrap_to_chars_basic() {
        assert_eq!(wrap_to_chars("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_to_chars("", 10), vec![""]);
        assert_eq!(wrap_to_chars("short", 10), vec!["short"]);
    }

    #[test]
    fn test_wrap_to_chars_hard_splits_long_words() {
        let lines = wrap_to_chars("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_max_chars_grows_with_width() {
        let narrow = max_chars_for_width(8.0, 20.0);
        let wide = max_chars_for_width(8.0, 40.0);
        assert!(wide > narrow);
        assert!(narrow >= 1);
    }
}
