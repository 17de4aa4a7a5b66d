use std::fmt;

/// A simple text-based table for terminal output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: &[&str]) -> Self {
        Table {
            col_widths: headers.iter().map(|h| h.len()).collect(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the table
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();

        for (i, cell) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(cell.len());
            }
        }

        self.rows.push(row);
    }

    fn fmt_row(&self, f: &mut fmt::Formatter<'_>, row: &[String]) -> fmt::Result {
        for (i, cell) in row.iter().enumerate() {
            if i >= self.col_widths.len() {
                break;
            }
            write!(f, "{:<width$}", cell, width = self.col_widths[i])?;
            if i < row.len() - 1 {
                write!(f, " | ")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_row(f, &self.headers)?;

        for (i, &width) in self.col_widths.iter().enumerate() {
            write!(f, "{}", "-".repeat(width))?;
            if i < self.col_widths.len() - 1 {
                write!(f, "-+-")?;
            }
        }
        writeln!(f)?;

        for row in &self.rows {
            self.fmt_row(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(&["Code", "Rate"]);
        table.add_row(["TRY", "41.20"]);
        table.add_row(["EUR", "0.92"]);

        let rendered = table.to_string();
        assert!(rendered.contains("Code"));
        assert!(rendered.contains("Rate"));
        assert!(rendered.contains("TRY"));
        assert!(rendered.contains("41.20"));
    }

    #[test]
    fn test_columns_widen_to_fit_rows() {
        let mut table = Table::new(&["Code", "Rate"]);
        table.add_row(["VERYLONGCODE", "1.00"]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("Code        "));
        assert!(lines[1].contains("-+-"));
    }
}
