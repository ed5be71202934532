//! Text output: a fixed-column parcel table.

use parcelpending_core::{Field, ParcelRecord};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";

/// Columns shown in the table, with their headings.
const COLUMNS: [(Field, &str); 6] = [
    (Field::PackageCode, "CODE"),
    (Field::Status, "STATUS"),
    (Field::LockerBox, "LOCKER"),
    (Field::Size, "SIZE"),
    (Field::Courier, "COURIER"),
    (Field::Delivered, "DELIVERED"),
];

/// Placeholder for missing cells.
const EMPTY_CELL: &str = "-";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats records as an aligned table followed by a count line.
    pub fn format_records(&self, records: &[ParcelRecord]) -> String {
        if records.is_empty() {
            return "No parcels found.".to_string();
        }

        let widths: Vec<usize> = COLUMNS
            .iter()
            .map(|(field, heading)| {
                records
                    .iter()
                    .map(|r| Self::cell(r, *field).chars().count())
                    .chain(std::iter::once(heading.len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let mut lines = Vec::with_capacity(records.len() + 2);

        let header: Vec<String> = COLUMNS
            .iter()
            .zip(&widths)
            .map(|((_, heading), width)| pad(heading, *width))
            .collect();
        lines.push(self.bold(header.join("  ").trim_end()));

        for record in records {
            let row: Vec<String> = COLUMNS
                .iter()
                .zip(&widths)
                .map(|((field, _), width)| {
                    let padded = pad(Self::cell(record, *field), *width);
                    if *field == Field::Status {
                        self.status_color(record.status(), &padded)
                    } else {
                        padded
                    }
                })
                .collect();
            lines.push(row.join("  ").trim_end().to_string());
        }

        lines.push(String::new());
        lines.push(Self::count_line(records.len()));
        lines.join("\n")
    }

    fn cell(record: &ParcelRecord, field: Field) -> &str {
        record.get(field).unwrap_or(EMPTY_CELL)
    }

    fn count_line(count: usize) -> String {
        if count == 1 {
            "1 parcel".to_string()
        } else {
            format!("{count} parcels")
        }
    }

    /// Picked-up parcels are dimmed; anything else waiting is green.
    fn status_color(&self, status: Option<&str>, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        match status {
            Some(s) if s.eq_ignore_ascii_case("picked up") => format!("{DIM}{text}{RESET}"),
            Some(_) => format!("{GREEN}{text}{RESET}"),
            None => text.to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Left-aligns `text` in a column of `width` characters.
fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}
