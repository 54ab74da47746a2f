use crate::errors::QueryError;

/// A row that can be laid out in a plain-text grid
pub trait TableRow {
    fn cells(&self) -> Vec<String>;
}

/// Immutable snapshot of one query execution.
///
/// An empty table is either a legitimate "no data" answer or a fail-soft
/// stand-in for a broken query; [`Table::failure`] tells the two apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    columns: &'static [&'static str],
    rows: Vec<R>,
    failure: Option<QueryError>,
}

impl<R> Table<R> {
    pub fn new(columns: &'static [&'static str], rows: Vec<R>) -> Self {
        Self {
            columns,
            rows,
            failure: None,
        }
    }

    pub fn empty(columns: &'static [&'static str]) -> Self {
        Self::new(columns, Vec::new())
    }

    /// Zero rows, defined columns, and the reason the query produced nothing
    pub fn failed(columns: &'static [&'static str], error: QueryError) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            failure: Some(error),
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&R> {
        self.rows.first()
    }

    /// First `n` rows (fewer if the table is shorter)
    pub fn head(&self, n: usize) -> &[R] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn failure(&self) -> Option<&QueryError> {
        self.failure.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Reshapes every row, keeping columns and failure state
    pub fn map<T, F>(self, f: F) -> Table<T>
    where
        F: FnMut(R) -> T,
    {
        Table {
            columns: self.columns,
            rows: self.rows.into_iter().map(f).collect(),
            failure: self.failure,
        }
    }
}

impl<R: TableRow> Table<R> {
    /// Aligned plain-text grid of the first `limit` rows (all rows when `None`)
    pub fn to_text(&self, limit: Option<usize>) -> String {
        let rows: Vec<Vec<String>> = self
            .head(limit.unwrap_or(self.rows.len()))
            .iter()
            .map(TableRow::cells)
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(align(self.columns.iter().copied(), &widths));
        for row in &rows {
            lines.push(align(row.iter().map(String::as_str), &widths));
        }
        lines.join("\n")
    }
}

fn align<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, u32);

    impl TableRow for Pair {
        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    const COLUMNS: &[&str] = &["Name", "Qty"];

    #[test]
    fn head_is_bounded() {
        let table = Table::new(COLUMNS, vec![Pair("a", 1), Pair("b", 2)]);
        assert_eq!(table.head(1).len(), 1);
        assert_eq!(table.head(10).len(), 2);
        assert!(!table.is_failed());
    }

    #[test]
    fn failed_table_keeps_columns() {
        let table: Table<Pair> = Table::failed(COLUMNS, QueryError::NotConnected);
        assert!(table.is_empty());
        assert_eq!(table.columns(), COLUMNS);
        assert_eq!(table.failure(), Some(&QueryError::NotConnected));
    }

    #[test]
    fn text_grid_is_right_aligned() {
        let table = Table::new(COLUMNS, vec![Pair("Aspirin", 120), Pair("Zinc", 7)]);
        assert_eq!(
            table.to_text(None),
            "   Name  Qty\nAspirin  120\n   Zinc    7"
        );
        assert_eq!(table.to_text(Some(1)), "   Name  Qty\nAspirin  120");
    }

    #[test]
    fn map_preserves_failure() {
        let table: Table<u32> = Table::failed(COLUMNS, QueryError::Execution("boom".into()));
        let mapped = table.map(|v| v * 2);
        assert!(mapped.is_failed());
    }
}
