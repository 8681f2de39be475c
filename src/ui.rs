/// User interface and status output utilities
///
/// This module handles:
/// - Thread-safe console output
/// - Colored terminal text
/// - The fixed-width record preview table for `list` and `import`
use crate::record::ServiceRecord;
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

/// Preview table columns: width and title.
const PREVIEW_COLUMNS: [(usize, &str); 7] =
    [(4, "No"), (20, "Customer Name"), (14, "Item"), (14, "Serial"), (10, "Status"), (10, "Date In"), (26, "Problem")];

/// Execute a function with exclusive access to console output
/// Prevents interleaved output from multiple threads
fn status_lock<F>(f: F)
where
    F: FnOnce() -> (),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
        }

        true
    }
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    println!("");
    print_color("error", term::color::BRIGHT_RED);
    println!(": {}", msg);
    println!("");
}

/// Print a warning with colored prefix
pub fn print_warning(msg: &str) {
    status_lock(|| {
        print_color("warning", term::color::BRIGHT_YELLOW);
        println!(": {}", msg);
    });
}

/// Print a success message with colored prefix
pub fn print_success(msg: &str) {
    status_lock(|| {
        print_color("ok", term::color::BRIGHT_GREEN);
        println!(": {}", msg);
    });
}

/// Print records as a fixed-width preview table
pub fn print_record_table(records: &[ServiceRecord]) {
    status_lock(|| {
        let header: Vec<String> =
            PREVIEW_COLUMNS.iter().map(|(width, title)| pad_truncate(title, *width)).collect();
        println!("{}", header.join(" | "));
        let rule_width = header.iter().map(|h| h.len()).sum::<usize>() + 3 * (PREVIEW_COLUMNS.len() - 1);
        println!("{}", "-".repeat(rule_width));

        for record in records {
            let date_in = record.date_in.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
            let cells = [
                record.no.to_string(),
                record.customer.clone(),
                record.item.clone(),
                record.serial.clone(),
                record.status.to_string(),
                date_in,
                record.problem.clone(),
            ];
            let row: Vec<String> = cells
                .iter()
                .zip(PREVIEW_COLUMNS)
                .map(|(cell, (width, _))| pad_truncate(cell, width))
                .collect();
            println!("{}", row.join(" | "));
        }
    });
}

/// Pad or truncate to a fixed display width, using unicode widths so wide
/// glyphs keep columns aligned
fn pad_truncate(text: &str, width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    let mut out = String::new();
    let mut used = 0usize;
    if text.width() <= width {
        out.push_str(text);
        used = text.width();
    } else {
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width.saturating_sub(1) {
                break;
            }
            out.push(ch);
            used += w;
        }
        out.push('…');
        used += 1;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_truncate_pads_short_text() {
        assert_eq!(pad_truncate("abc", 6), "abc   ");
    }

    #[test]
    fn test_pad_truncate_truncates_with_ellipsis() {
        let out = pad_truncate("a very long customer name", 8);
        assert!(out.ends_with('…'));
        use unicode_width::UnicodeWidthStr;
        assert_eq!(out.width(), 8);
    }
}
