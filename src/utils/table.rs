//! Table rendering utilities for CLI outputs.

use crate::models::Component;
use crate::utils::colors::{RESET, color_for_quantity, colorize_optional};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

/// Pad by display width, so accented names and symbols stay aligned.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

fn strip_ansi_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for ch in s.chars() {
        if in_escape {
            if ch == 'm' {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    width
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&"-".repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let visible = strip_ansi_width(cell);
                out.push_str(cell);
                if visible < col.width {
                    out.push_str(&" ".repeat(col.width - visible));
                }
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

/// Build the standard component listing.
pub fn component_table(components: &[Component], threshold: i32, date_format: &str) -> Table {
    let width_of = |f: &dyn Fn(&Component) -> usize, header: &str| {
        components
            .iter()
            .map(f)
            .max()
            .unwrap_or(0)
            .max(UnicodeWidthStr::width(header))
    };

    let mut table = Table::new(vec![
        Column {
            header: "ID".into(),
            width: width_of(&|c| c.id.map(|i| i.to_string().len()).unwrap_or(1), "ID"),
        },
        Column {
            header: "Name".into(),
            width: width_of(&|c| UnicodeWidthStr::width(c.name.as_str()), "Name"),
        },
        Column {
            header: "Type".into(),
            width: width_of(&|c| UnicodeWidthStr::width(c.kind.as_str()), "Type"),
        },
        Column {
            header: "Qty".into(),
            width: width_of(&|c| c.quantity.to_string().len(), "Qty"),
        },
        Column {
            header: "Location".into(),
            width: width_of(&|c| UnicodeWidthStr::width(c.location_str()), "Location"),
        },
        Column {
            header: "Purchased".into(),
            width: 10,
        },
    ]);

    for c in components {
        let qty_color = color_for_quantity(c.quantity, threshold);
        let date = c
            .purchase_timestamp
            .and_then(|ts| crate::utils::date::timestamp_to_date_str(ts, date_format))
            .unwrap_or_else(|| "No date".to_string());

        table.add_row(vec![
            c.id.map(|i| i.to_string()).unwrap_or_else(|| "-".into()),
            c.name.clone(),
            c.kind.clone(),
            format!("{qty_color}{}{RESET}", c.quantity),
            colorize_optional(c.location_str()),
            colorize_optional(&date),
        ]);
    }

    table
}
