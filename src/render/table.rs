//! Pipe-table normalization.
//!
//! Source tables may be ragged. Rows are padded to a common column count
//! before serialization, and the first row always becomes the header.

/// Collects rendered rows and serializes them as a Markdown pipe table.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    rows: Vec<Vec<String>>,
}

impl TableBuilder {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row of rendered cells. Rows without cells are dropped.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row: Vec<String> = cells
            .into_iter()
            .map(|cell| normalize_cell(cell.as_ref()))
            .collect();
        if !row.is_empty() {
            self.rows.push(row);
        }
    }

    /// Widest row's cell count.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Serialize the table. An empty table renders as an empty string.
    pub fn render(mut self) -> String {
        let columns = self.column_count();
        if columns == 0 {
            return String::new();
        }

        for row in &mut self.rows {
            row.resize(columns, String::new());
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let mut rows = self.rows.iter();
        if let Some(header) = rows.next() {
            lines.push(header.join(" | "));
            lines.push(vec!["---"; columns].join(" | "));
        }
        lines.extend(rows.map(|row| row.join(" | ")));

        lines.join("\n")
    }
}

/// Fit rendered cell content on a single table line.
///
/// Line breaks collapse to single spaces, surrounding whitespace is trimmed
/// and pipes are escaped.
pub fn normalize_cell(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
