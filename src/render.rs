//! Plain-text rendering of query results.
//!
//! Draws a psql-style box table with a row-count footer. Used by the
//! REPL and one-shot modes; nothing here touches the terminal directly.

use crate::db::QueryResult;

/// Maximum column width before truncation.
const MAX_COLUMN_WIDTH: usize = 40;

/// Renders a query result as a box-drawn table with a summary footer.
///
/// Statements that produce no result grid (INSERT, UPDATE, DDL) render
/// as a single confirmation line. A SELECT with zero rows still shows
/// its column headers.
pub fn render_table(result: &QueryResult) -> String {
    let elapsed_ms = result.execution_time.as_millis();

    if result.columns.is_empty() {
        return format!("Query OK ({} ms)", elapsed_ms);
    }

    let headers: Vec<String> = result
        .columns
        .iter()
        .map(|c| truncate(&c.name.to_uppercase(), MAX_COLUMN_WIDTH))
        .collect();

    let string_rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| truncate(&v.to_display_string(), MAX_COLUMN_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &string_rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut output = String::new();
    push_border(&mut output, &widths, '┌', '┬', '┐');
    push_row(&mut output, &headers, &widths);
    push_border(&mut output, &widths, '├', '┼', '┤');
    for row in &string_rows {
        push_row(&mut output, row, &widths);
    }
    push_border(&mut output, &widths, '└', '┴', '┘');

    let row_label = if result.row_count == 1 { "row" } else { "rows" };
    output.push_str(&format!(
        "{} {} returned ({} ms)",
        result.row_count, row_label, elapsed_ms
    ));

    output
}

/// Appends one horizontal border line.
fn push_border(output: &mut String, widths: &[usize], left: char, mid: char, right: char) {
    output.push(left);
    for (idx, width) in widths.iter().enumerate() {
        output.push_str(&"─".repeat(width + 2));
        output.push(if idx == widths.len() - 1 { right } else { mid });
    }
    output.push('\n');
}

/// Appends one padded cell row.
fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    output.push('│');
    for (i, cell) in cells.iter().enumerate() {
        output.push(' ');
        output.push_str(&format!("{:width$}", cell, width = widths[i]));
        output.push(' ');
        output.push('│');
    }
    output.push('\n');
}

/// Truncates a string to max width with ellipsis.
fn truncate(value: &str, max_width: usize) -> String {
    if value.len() <= max_width {
        value.to_string()
    } else {
        let take = max_width.saturating_sub(3);
        format!("{}...", value.chars().take(take).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, QueryResult, Value};
    use std::time::Duration;

    fn sample_result() -> QueryResult {
        QueryResult::with_data(
            vec![
                ColumnInfo::new("name", "TEXT"),
                ColumnInfo::new("purchase_amount", "INTEGER"),
            ],
            vec![
                vec![Value::Text("Neerja".to_string()), Value::Int(2500)],
                vec![Value::Text("Rehman".to_string()), Value::Int(7568)],
            ],
        )
        .with_execution_time(Duration::from_millis(4))
    }

    #[test]
    fn test_render_uppercases_headers() {
        let rendered = render_table(&sample_result());
        assert!(rendered.contains("NAME"));
        assert!(rendered.contains("PURCHASE_AMOUNT"));
    }

    #[test]
    fn test_render_contains_values_and_borders() {
        let rendered = render_table(&sample_result());
        assert!(rendered.contains("Neerja"));
        assert!(rendered.contains("7568"));
        assert!(rendered.starts_with('┌'));
        assert!(rendered.contains('┼'));
        assert!(rendered.contains('┘'));
    }

    #[test]
    fn test_render_footer_counts_rows() {
        let rendered = render_table(&sample_result());
        assert!(rendered.ends_with("2 rows returned (4 ms)"));
    }

    #[test]
    fn test_render_single_row_uses_singular() {
        let result = QueryResult::with_data(
            vec![ColumnInfo::new("name", "TEXT")],
            vec![vec![Value::Text("Neerja".to_string())]],
        );
        let rendered = render_table(&result);
        assert!(rendered.contains("1 row returned"));
    }

    #[test]
    fn test_render_zero_rows_still_shows_headers() {
        let result = QueryResult::with_data(
            vec![
                ColumnInfo::new("name", "TEXT"),
                ColumnInfo::new("city", "TEXT"),
            ],
            vec![],
        );
        let rendered = render_table(&result);
        assert!(rendered.contains("NAME"));
        assert!(rendered.contains("CITY"));
        assert!(rendered.contains("0 rows returned"));
    }

    #[test]
    fn test_render_without_grid_is_confirmation_line() {
        let result = QueryResult::new().with_execution_time(Duration::from_millis(2));
        assert_eq!(render_table(&result), "Query OK (2 ms)");
    }

    #[test]
    fn test_render_null_values() {
        let result = QueryResult::with_data(
            vec![ColumnInfo::new("city", "TEXT")],
            vec![vec![Value::Null]],
        );
        assert!(render_table(&result).contains("NULL"));
    }

    #[test]
    fn test_truncate_long_values() {
        assert_eq!(truncate("short", 10), "short");
        let long = "x".repeat(60);
        let truncated = truncate(&long, 40);
        assert_eq!(truncated.len(), 40);
        assert!(truncated.ends_with("..."));
    }
}
