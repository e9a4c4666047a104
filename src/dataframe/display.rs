use std::fmt::{self, Display};

use crate::core::Value;
use crate::dataframe::base::DataFrame;

const CELL_WIDTH: usize = 12;

fn render(value: &Value) -> String {
    match value {
        Value::Float(x) => format!("{:.3}", x),
        other => other.to_string(),
    }
}

/// Bounded text table; limits come from the frame's `FrameConfig`
impl Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_series { "Series" } else { "DataFrame" };
        if self.columns.is_empty() {
            return write!(f, "{} (0 rows x 0 columns)", kind);
        }
        writeln!(
            f,
            "{} ({} rows x {} columns):",
            kind,
            self.row_count(),
            self.column_count()
        )?;

        let shown_columns = self.column_count().min(self.config.max_display_columns);
        let shown_rows = self.row_count().min(self.config.max_display_rows);

        write!(f, "{:<5} |", "")?;
        for name in &self.columns[..shown_columns] {
            write!(f, " {:<width$} |", name, width = CELL_WIDTH)?;
        }
        if shown_columns < self.column_count() {
            write!(f, " ...")?;
        }
        writeln!(f)?;

        write!(f, "{:-<5}-+", "")?;
        for _ in 0..shown_columns {
            write!(f, "-{:-<width$}-+", "", width = CELL_WIDTH)?;
        }
        writeln!(f)?;

        for row in 0..shown_rows {
            let label = self
                .index
                .get_value(row)
                .map(|l| l.to_string())
                .unwrap_or_default();
            write!(f, "{:<5} |", label)?;
            for col in &self.data[..shown_columns] {
                write!(f, " {:<width$} |", render(&col[row]), width = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }

        if self.row_count() > shown_rows {
            writeln!(f, "... ({} more rows)", self.row_count() - shown_rows)?;
        }
        if shown_columns < self.column_count() {
            writeln!(f, "... ({} more columns)", self.column_count() - shown_columns)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::FrameConfig;
    use crate::dataframe::{DataFrame, FrameData, FrameOptions};

    #[test]
    fn test_respects_display_limits() {
        let config = FrameConfig::default()
            .with_max_display_rows(2)
            .with_max_display_columns(1);
        let df = DataFrame::new(
            FrameData::from_rows((0..5).map(|i| vec![i, i * 10])),
            FrameOptions::new().columns(["a", "b"]).config(config),
        )
        .unwrap();
        let text = df.to_string();
        assert!(text.starts_with("DataFrame (5 rows x 2 columns):"));
        assert!(text.contains("... (3 more rows)"));
        assert!(text.contains("... (1 more columns)"));
        assert!(!text.contains(" b "));
    }

    #[test]
    fn test_empty_frame() {
        assert_eq!(DataFrame::empty().to_string(), "DataFrame (0 rows x 0 columns)");
    }
}
