use crate::error::{MergeError, Result, Stage};
use crate::table::Table;
use tracing::debug;

/// Rename columns by `(old, new)` pairs. Values and row order are unchanged.
///
/// Every old name must exist, and no new name may land on a column that keeps
/// its current name.
pub fn rename(table: Table, mapping: &[(&str, &str)], table_name: &str) -> Result<Table> {
    for (old, _) in mapping {
        if table.position(old).is_none() {
            return Err(MergeError::missing_column(Stage::Rename, table_name, old));
        }
    }

    let mut columns = table.into_columns();
    for (name, _) in columns.iter_mut() {
        if let Some((old, new)) = mapping.iter().find(|(old, _)| *old == name.as_str()) {
            debug!("{}: renaming '{}' -> '{}'", table_name, old, new);
            *name = new.to_string();
        }
    }

    for (i, (name, _)) in columns.iter().enumerate() {
        if columns[..i].iter().any(|(other, _)| other == name) {
            return Err(MergeError::Schema {
                stage: Stage::Rename,
                table: table_name.to_string(),
                column: name.clone(),
                message: "rename would create a duplicate column".to_string(),
            });
        }
    }

    Ok(Table::new(columns))
}
