//! Per-column type inference for schema-on-read input

use super::Column;

/// Cell contents treated as missing values
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "NULL", "null", "#N/A", "<NA>",
];

pub fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell)
}

/// Build a typed column from raw cells.
///
/// Int if every present cell parses as i64, else Float if every present cell
/// parses as f64, else Text. A column with no present cells is Text.
pub fn infer_column(cells: Vec<String>, force_text: bool) -> Column {
    let present = cells.iter().filter(|c| !is_missing(c)).count();

    if !force_text && present > 0 {
        let present_cells = || cells.iter().filter(|c| !is_missing(c)).map(|c| c.trim());

        if present_cells().all(|c| c.parse::<i64>().is_ok()) {
            return Column::Int(
                cells
                    .iter()
                    .map(|c| if is_missing(c) { None } else { c.trim().parse().ok() })
                    .collect(),
            );
        }
        if present_cells().all(|c| c.parse::<f64>().is_ok()) {
            return Column::Float(
                cells
                    .iter()
                    .map(|c| if is_missing(c) { None } else { c.trim().parse().ok() })
                    .collect(),
            );
        }
    }

    Column::Text(
        cells
            .into_iter()
            .map(|c| if is_missing(&c) { None } else { Some(c) })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_infer_int() {
        let col = infer_column(cells(&["5000", "", "0"]), false);
        assert_eq!(col, Column::Int(vec![Some(5000), None, Some(0)]));
    }

    #[test]
    fn test_infer_float_when_mixed_with_int() {
        let col = infer_column(cells(&["10", "20.5", "NA"]), false);
        assert_eq!(col, Column::Float(vec![Some(10.0), Some(20.5), None]));
    }

    #[test]
    fn test_infer_text() {
        let col = infer_column(cells(&["I0001", "12", ".."]), false);
        assert_eq!(
            col,
            Column::Text(vec![Some("I0001".into()), Some("12".into()), Some("..".into())])
        );
    }

    #[test]
    fn test_forced_text_keeps_leading_zeros() {
        let col = infer_column(cells(&["007", "42"]), true);
        assert_eq!(col, Column::Text(vec![Some("007".into()), Some("42".into())]));
    }

    #[test]
    fn test_all_missing_is_text() {
        let col = infer_column(cells(&["", "NaN"]), false);
        assert_eq!(col, Column::Text(vec![None, None]));
    }
}
