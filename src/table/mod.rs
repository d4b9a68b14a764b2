//! Typed in-memory tables
//!
//! A `Table` is an ordered list of named, homogeneously typed columns of equal
//! length. Missing cells are `None` in every column type.

pub mod infer;

use std::fmt;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int => f.write_str("int"),
            ColumnType::Float => f.write_str("float"),
            ColumnType::Text => f.write_str("text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// A borrowed cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Missing,
    Int(i64),
    Float(f64),
    Text(&'a str),
}

/// Shortest round-trip form with a fractional part (`10.0`). Exponents carry a
/// sign and at least two digits: `1e-05`, `1.5e+16`.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    let repr = format!("{:?}", v);
    match repr.split_once('e') {
        None => f.write_str(&repr),
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) if v.is_finite() => write_float(f, *v),
            Value::Float(v) if v.is_nan() => Ok(()),
            Value::Float(v) if *v > 0.0 => f.write_str("inf"),
            Value::Float(_) => f.write_str("-inf"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int(_) => ColumnType::Int,
            Column::Float(_) => ColumnType::Float,
            Column::Text(_) => ColumnType::Text,
        }
    }

    pub fn get(&self, row: usize) -> Value<'_> {
        match self {
            Column::Int(v) => v[row].map_or(Value::Missing, Value::Int),
            Column::Float(v) => v[row].map_or(Value::Missing, Value::Float),
            Column::Text(v) => v[row].as_deref().map_or(Value::Missing, Value::Text),
        }
    }

    /// Gather rows by index, in the given order. Indices may repeat.
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Int(v) => Column::Int(indices.iter().map(|&i| v[i]).collect()),
            Column::Float(v) => Column::Float(indices.iter().map(|&i| v[i]).collect()),
            Column::Text(v) => Column::Text(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<(String, Column)>,
    rows: usize,
}

impl Table {
    /// Build a table from named columns.
    ///
    /// # Panics
    /// If the columns differ in length or a name repeats. Loaders and operators
    /// check both before calling.
    pub fn new(columns: Vec<(String, Column)>) -> Self {
        let rows = columns.first().map_or(0, |(_, c)| c.len());
        for (i, (name, col)) in columns.iter().enumerate() {
            assert_eq!(col.len(), rows, "column '{}' has {} rows, expected {}", name, col.len(), rows);
            assert!(
                !columns[..i].iter().any(|(other, _)| other == name),
                "duplicate column '{}'",
                name
            );
        }
        Table { columns, rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn columns(&self) -> &[(String, Column)] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<(String, Column)> {
        self.columns
    }

    /// One row as borrowed cells, in column order
    pub fn row(&self, row: usize) -> Vec<Value<'_>> {
        self.columns.iter().map(|(_, c)| c.get(row)).collect()
    }
}
