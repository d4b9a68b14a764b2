use crate::error::{MergeError, Result, Stage};
use crate::table::Table;

/// Keep only `columns`, in that order. Row count and order are unchanged.
pub fn project(table: &Table, columns: &[&str], table_name: &str) -> Result<Table> {
    if let Some((i, dup)) = columns.iter().enumerate().find(|(i, c)| columns[..*i].contains(*c)) {
        return Err(MergeError::Schema {
            stage: Stage::Project,
            table: table_name.to_string(),
            column: dup.to_string(),
            message: format!("selected more than once (position {})", i + 1),
        });
    }

    let selected = columns
        .iter()
        .map(|&name| {
            table
                .column(name)
                .map(|c| (name.to_string(), c.clone()))
                .ok_or_else(|| MergeError::missing_column(Stage::Project, table_name, name))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Table::new(selected))
}
