//! Fixed-width table rendering for the CLI listings.
//!
//! Cell values longer than their column are clipped with an ellipsis so the
//! denormalized employee names, which carry the "(Backup for ...)"
//! annotation, never break the alignment.

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
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

        for col in &self.columns {
            out.push_str(&format!(
                "{:<width$} ",
                clip(&col.header, col.width),
                width = col.width
            ));
        }
        out.push('\n');

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&format!(
                    "{:<width$} ",
                    clip(cell, col.width),
                    width = col.width
                ));
            }
            out.push('\n');
        }

        out
    }
}
