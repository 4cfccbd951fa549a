// Report rendering
// Builds the fixed summary table (eight statistics crossed with the two
// input columns) and renders it. Nothing is rendered until every statistic
// has been computed, so a failure mid-way never leaves partial output.

use crate::db::BusinessRow;
use crate::error::ReportError;
use crate::stats::{describe, ColumnSummary, STATISTICS};
use serde::Serialize;

/// One summarized column of the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportColumn {
    pub name: String,
    #[serde(flatten)]
    pub stats: ColumnSummary,
}

/// The complete statistics table.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Summary {
    pub columns: Vec<ReportColumn>,
}

/// Summarize the result table into the report.
///
/// NULL cells are dropped per column before computing anything, so the
/// `count` statistic is the count of non-missing values. A non-finite
/// value is unexpected (MySQL cannot store one) and fails the run.
pub fn summarize(rows: &[BusinessRow]) -> Result<Summary, ReportError> {
    let review_counts = finite_column(
        "review_count",
        rows.iter().filter_map(|r| r.review_count.map(|v| v as f64)),
    )?;
    let stars = finite_column("stars", rows.iter().filter_map(|r| r.stars))?;

    Ok(Summary {
        columns: vec![
            ReportColumn {
                name: "review_count".to_string(),
                stats: describe(&review_counts),
            },
            ReportColumn {
                name: "stars".to_string(),
                stats: describe(&stars),
            },
        ],
    })
}

/// Collect a column, rejecting values the formatter cannot represent.
fn finite_column(
    name: &str,
    values: impl Iterator<Item = f64>,
) -> Result<Vec<f64>, ReportError> {
    let values: Vec<f64> = values.collect();
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(ReportError::Formatting(format!(
            "non-finite value {bad} in column '{name}'"
        )));
    }
    Ok(values)
}

impl Summary {
    /// Render as CSV: one line per statistic, the statistic name first,
    /// then one value per column, each formatted to two decimal places.
    /// No header line; rows are newline-terminated.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();

        for (i, name) in STATISTICS.iter().enumerate() {
            out.push_str(name);
            for column in &self.columns {
                out.push(',');
                out.push_str(&format_cell(column.stats.cells()[i]));
            }
            out.push('\n');
        }

        out
    }

    /// Render as pretty-printed JSON: an array of per-column objects.
    pub fn to_json(&self) -> Result<String, ReportError> {
        let mut text = serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::Formatting(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}

/// Format one cell. An undefined statistic renders as an empty field,
/// the way the reference implementation prints missing values.
fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(review_count: i64, stars: f64) -> BusinessRow {
        BusinessRow {
            review_count: Some(review_count),
            stars: Some(stars),
        }
    }

    #[test]
    fn test_csv_output_is_byte_exact() {
        let rows = vec![row(3, 1.0), row(4, 3.0), row(8, 3.5), row(23, 4.5)];
        let summary = summarize(&rows).unwrap();

        let expected = "\
count,4.00,4.00
mean,9.50,3.00
std,9.26,1.47
min,3.00,1.00
25%,3.75,2.50
50%,6.00,3.25
75%,11.75,3.75
max,23.00,4.50
";
        assert_eq!(summary.to_csv(), expected);
    }

    #[test]
    fn test_csv_shape() {
        let rows = vec![row(1, 5.0), row(2, 4.0)];
        let csv = summarize(&rows).unwrap().to_csv();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 8);
        for line in &lines {
            assert_eq!(line.split(',').count(), 3);
        }
        // No header: the first line is already the count statistic
        assert!(lines[0].starts_with("count,"));
    }

    #[test]
    fn test_null_cells_are_excluded_from_count() {
        let rows = vec![
            row(3, 1.0),
            BusinessRow {
                review_count: Some(4),
                stars: None,
            },
            row(8, 3.5),
        ];
        let summary = summarize(&rows).unwrap();

        assert_eq!(summary.columns[0].stats.count, 3);
        assert_eq!(summary.columns[1].stats.count, 2);

        let first_line = summary.to_csv().lines().next().unwrap().to_string();
        assert_eq!(first_line, "count,3.00,2.00");
    }

    #[test]
    fn test_empty_table_renders_missing_cells() {
        let csv = summarize(&[]).unwrap().to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "count,0.00,0.00");
        // Every other statistic is undefined on zero rows
        assert_eq!(lines[1], "mean,,");
        assert_eq!(lines[7], "max,,");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_single_row_has_empty_std_cells() {
        let csv = summarize(&[row(10, 4.0)]).unwrap().to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "count,1.00,1.00");
        assert_eq!(lines[2], "std,,");
        assert_eq!(lines[3], "min,10.00,4.00");
        assert_eq!(lines[7], "max,10.00,4.00");
    }

    #[test]
    fn test_quartile_ordering_holds_in_output() {
        let rows = vec![
            row(3, 1.0),
            row(4, 3.0),
            row(4, 3.0),
            row(8, 3.5),
            row(23, 4.5),
            row(7361, 5.0),
        ];
        let summary = summarize(&rows).unwrap();

        for column in &summary.columns {
            let s = &column.stats;
            assert!(s.min <= s.p25);
            assert!(s.p25 <= s.p50);
            assert!(s.p50 <= s.p75);
            assert!(s.p75 <= s.max);
        }
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let rows = vec![row(3, 1.0), row(4, 3.0), row(8, 3.5)];
        let first = summarize(&rows).unwrap().to_csv();
        let second = summarize(&rows).unwrap().to_csv();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_finite_value_is_a_formatting_error() {
        let rows = vec![row(3, 1.0), row(4, f64::NAN)];
        let err = summarize(&rows).unwrap_err();
        assert!(matches!(err, ReportError::Formatting(_)));
    }

    #[test]
    fn test_json_output_shape() {
        let rows = vec![row(3, 1.0), row(4, 3.0)];
        let json = summarize(&rows).unwrap().to_json().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let columns = parsed.as_array().unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0]["name"], "review_count");
        assert_eq!(columns[1]["name"], "stars");
        assert_eq!(columns[0]["count"], 2);
        assert!(columns[0]["25%"].is_number());
    }
}
