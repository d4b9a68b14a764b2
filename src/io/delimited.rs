use crate::error::{MergeError, Result, Stage};
use crate::io::Delimiter;
use crate::table::infer::infer_column;
use crate::table::Table;
use flate2::read::MultiGzDecoder;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{debug, info};

/// How to read a delimited table
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: Delimiter,
    /// Columns kept as text regardless of content, e.g. identifier keys
    pub text_columns: Vec<String>,
}

impl LoadOptions {
    pub fn new(delimiter: Delimiter) -> Self {
        LoadOptions {
            delimiter,
            text_columns: Vec::new(),
        }
    }

    pub fn with_text_column(mut self, name: &str) -> Self {
        self.text_columns.push(name.to_string());
        self
    }
}

/// Open a table file for reading, handles gzipped files automatically
fn open_table(path: &str) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| MergeError::from_read(path, e))?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Load a delimited file with a header row into a typed table.
///
/// The file handle is dropped before returning, on success or error.
pub fn load(path: &str, options: &LoadOptions) -> Result<Table> {
    info!("Loading {} ({}-separated)", path, options.delimiter);
    let reader = open_table(path)?;
    let table = read_table(reader, path, options)?;
    info!(
        "Loaded {} rows x {} columns from {}",
        table.num_rows(),
        table.num_columns(),
        path
    );
    Ok(table)
}

/// Parse a delimited table from any reader. `source` names it in errors.
///
/// Character delimiters go through the csv reader, so quoted fields are
/// unquoted and only fully empty lines are skipped. Whitespace-run tables are
/// split by hand and skip blank lines.
pub fn read_table<R: BufRead>(reader: R, source: &str, options: &LoadOptions) -> Result<Table> {
    let (names, cells) = match options.delimiter {
        Delimiter::Char(c) => read_quoted(reader, source, c)?,
        Delimiter::Whitespace => read_whitespace(reader, source)?,
    };

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| {
            let force_text = options.text_columns.iter().any(|t| *t == name);
            let column = infer_column(raw, force_text);
            debug!("{}: column '{}' inferred as {}", source, name, column.column_type());
            (name, column)
        })
        .collect();

    Ok(Table::new(columns))
}

type RawColumns = (Vec<String>, Vec<Vec<String>>);

fn parse_error(source: &str, line: usize, message: String) -> MergeError {
    MergeError::Parse {
        path: source.to_string(),
        line,
        message,
    }
}

fn check_header(source: &str, line: usize, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(parse_error(source, line, format!("duplicate column '{}' in header", name)));
        }
    }
    Ok(())
}

fn map_csv_error(source: &str, err: csv::Error) -> MergeError {
    let line = err.position().map_or(0, |pos| pos.line() as usize);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => MergeError::Io {
            stage: Stage::Load,
            path: source.to_string(),
            source: e,
        },
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
            parse_error(source, line, format!("expected {} fields, found {}", expected_len, len))
        }
        csv::ErrorKind::Utf8 { err, .. } => parse_error(source, line, format!("invalid UTF-8: {}", err)),
        other => parse_error(source, line, format!("{:?}", other)),
    }
}

fn read_quoted<R: BufRead>(reader: R, source: &str, delimiter: char) -> Result<RawColumns> {
    if !delimiter.is_ascii() {
        return Err(parse_error(source, 0, format!("delimiter '{}' is not a single-byte character", delimiter)));
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let header = csv_reader.headers().map_err(|e| map_csv_error(source, e))?;
    if header.is_empty() {
        return Err(parse_error(source, 0, "missing header row".to_string()));
    }
    let header_line = header.position().map_or(1, |pos| pos.line() as usize);
    let names: Vec<String> = header.iter().map(|s| s.to_string()).collect();
    check_header(source, header_line, &names)?;

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for record in csv_reader.records() {
        let record = record.map_err(|e| map_csv_error(source, e))?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    Ok((names, cells))
}

fn read_whitespace<R: BufRead>(reader: R, source: &str) -> Result<RawColumns> {
    let mut header: Option<Vec<String>> = None;
    let mut cells: Vec<Vec<String>> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| MergeError::Io {
            stage: Stage::Load,
            path: source.to_string(),
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = Delimiter::Whitespace.split(&line);
        if header.is_none() {
            let names: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
            check_header(source, line_no, &names)?;
            cells = vec![Vec::new(); names.len()];
            header = Some(names);
            continue;
        }

        if fields.len() != cells.len() {
            return Err(parse_error(
                source,
                line_no,
                format!("expected {} fields, found {}", cells.len(), fields.len()),
            ));
        }
        for (column, field) in cells.iter_mut().zip(fields) {
            column.push(field.to_string());
        }
    }

    let names = header.ok_or_else(|| parse_error(source, 0, "missing header row".to_string()))?;
    Ok((names, cells))
}
