//! Plain-text table layout used by list commands and the report
//! documents. Cells are uncolored, so width handling is plain `char`
//! counting.

/// Describes how a column aligns its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            alignment: Alignment::Right,
        }
    }
}

/// A table with column metadata and rows of already-formatted cells.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = column.header.chars().count().max(column.min_width);
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(cell.chars().count());
                    }
                }
                width
            })
            .collect()
    }

    fn render_cells(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                let pad = widths[idx].saturating_sub(text.chars().count());
                match column.alignment {
                    Alignment::Left => format!("{text}{}", " ".repeat(pad)),
                    Alignment::Right => format!("{}{text}", " ".repeat(pad)),
                }
            })
            .collect();
        cells.join("  ").trim_end().to_string()
    }

    /// Renders the table with a header row and a rule underneath.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let mut out = self.render_cells(&header, &widths);
        out.push('\n');
        out.push_str(&rule(&widths));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&self.render_cells(row, &widths));
        }
        out
    }
}

fn rule(widths: &[usize]) -> String {
    let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
    "-".repeat(total)
}
