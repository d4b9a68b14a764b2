use crate::error::{MergeError, Result, Stage};
use crate::table::{Column, Table};
use ahash::AHashMap;
use tracing::{debug, info};

/// Suffixes appended to non-key columns present on both sides of a join
#[derive(Debug, Clone)]
pub struct JoinSuffixes {
    pub left: String,
    pub right: String,
}

impl Default for JoinSuffixes {
    fn default() -> Self {
        JoinSuffixes {
            left: "_x".to_string(),
            right: "_y".to_string(),
        }
    }
}

/// Hashable key cell. Both sides of a join share one column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Key<'a> {
    Int(i64),
    Float(u64),
    Text(&'a str),
}

fn key_at(column: &Column, row: usize) -> Option<Key<'_>> {
    match column {
        Column::Int(v) => v[row].map(Key::Int),
        // -0.0 and 0.0 compare equal, so hash them the same
        Column::Float(v) => v[row]
            .filter(|f| !f.is_nan())
            .map(|f| Key::Float(if f == 0.0 { 0 } else { f.to_bits() })),
        Column::Text(v) => v[row].as_deref().map(Key::Text),
    }
}

/// Inner join on a column present in both tables.
///
/// Produces one row per matching `(left, right)` pair, ordered by left row and
/// then right row, so duplicate keys fan out. Rows whose key is missing or has
/// no partner are dropped. The key column keeps its position in `left` and
/// appears once; remaining left columns come first, then right columns.
pub fn join(left: &Table, right: &Table, key: &str, suffixes: &JoinSuffixes) -> Result<Table> {
    let left_key = left
        .column(key)
        .ok_or_else(|| MergeError::missing_column(Stage::Join, "left table", key))?;
    let right_key = right
        .column(key)
        .ok_or_else(|| MergeError::missing_column(Stage::Join, "right table", key))?;

    if left_key.column_type() != right_key.column_type() {
        return Err(MergeError::Schema {
            stage: Stage::Join,
            table: "both tables".to_string(),
            column: key.to_string(),
            message: format!(
                "key types differ ({} vs {}); refusing to coerce",
                left_key.column_type(),
                right_key.column_type()
            ),
        });
    }

    let mut index: AHashMap<Key<'_>, Vec<usize>> = AHashMap::with_capacity(right.num_rows());
    for row in 0..right.num_rows() {
        if let Some(k) = key_at(right_key, row) {
            index.entry(k).or_default().push(row);
        }
    }
    debug!("Join index built with {} distinct keys", index.len());

    let mut left_rows = Vec::new();
    let mut right_rows = Vec::new();
    for row in 0..left.num_rows() {
        let matches = key_at(left_key, row).and_then(|k| index.get(&k));
        if let Some(matches) = matches {
            for &r in matches {
                left_rows.push(row);
                right_rows.push(r);
            }
        }
    }

    let in_right = |name: &str| name != key && right.position(name).is_some();
    let in_left = |name: &str| name != key && left.position(name).is_some();

    let mut columns = Vec::with_capacity(left.num_columns() + right.num_columns() - 1);
    for (name, column) in left.columns() {
        let name = if in_right(name.as_str()) {
            format!("{}{}", name, suffixes.left)
        } else {
            name.clone()
        };
        columns.push((name, column.take(&left_rows)));
    }
    for (name, column) in right.columns() {
        if name == key {
            continue;
        }
        let name = if in_left(name.as_str()) {
            format!("{}{}", name, suffixes.right)
        } else {
            name.clone()
        };
        columns.push((name, column.take(&right_rows)));
    }

    for (i, (name, _)) in columns.iter().enumerate() {
        if columns[..i].iter().any(|(other, _)| other == name) {
            return Err(MergeError::Schema {
                stage: Stage::Join,
                table: "joined table".to_string(),
                column: name.clone(),
                message: "suffixed column name collides with an existing column".to_string(),
            });
        }
    }

    info!(
        "Inner join on '{}': {} x {} rows -> {} rows",
        key,
        left.num_rows(),
        right.num_rows(),
        left_rows.len()
    );
    Ok(Table::new(columns))
}
