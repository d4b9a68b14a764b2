use crate::error::{MergeError, Result, Stage};
use crate::io::Delimiter;
use crate::table::Table;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

fn write_error(path: &str, source: io::Error) -> MergeError {
    MergeError::Io {
        stage: Stage::Write,
        path: path.to_string(),
        source,
    }
}

/// Create a temporary file in the directory that will hold `path`
pub fn stage(path: &str) -> Result<NamedTempFile> {
    let dir = match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).map_err(|e| write_error(path, e))
}

/// Move a fully written staged file over `path`
pub fn commit(tmp: NamedTempFile, path: &str) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| write_error(path, e))?;
    }

    tmp.persist(path).map_err(|e| write_error(path, e.error))?;
    Ok(())
}

/// Write a table as delimited text: header line, then one line per row.
///
/// The table is written to a temporary file next to `path` and moved into place
/// once complete, so a failed write never leaves a partial file behind and a
/// previous output is only replaced by a complete one. Paths ending in `.gz`
/// are gzip-compressed.
pub fn write(table: &Table, path: &str, delimiter: Delimiter) -> Result<()> {
    let mut tmp = stage(path)?;

    if path.ends_with(".gz") {
        let mut encoder = GzEncoder::new(BufWriter::new(tmp.as_file_mut()), Compression::default());
        write_table(table, &mut encoder, delimiter).map_err(|e| write_error(path, e))?;
        encoder
            .finish()
            .and_then(|mut w| w.flush())
            .map_err(|e| write_error(path, e))?;
    } else {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_table(table, &mut writer, delimiter).map_err(|e| write_error(path, e))?;
        writer.flush().map_err(|e| write_error(path, e))?;
    }

    commit(tmp, path)?;
    info!("Wrote {} rows x {} columns to {}", table.num_rows(), table.num_columns(), path);
    Ok(())
}

/// Serialize a table to any writer.
///
/// Fields holding the separator, a quote or a line break are quoted.
pub fn write_table<W: Write>(table: &Table, writer: &mut W, delimiter: Delimiter) -> io::Result<()> {
    let sep = match delimiter {
        Delimiter::Char(c) if c.is_ascii() => c as u8,
        Delimiter::Char(c) => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("delimiter '{}' is not a single-byte character", c),
            ))
        }
        Delimiter::Whitespace => b' ',
    };

    let mut csv_writer = csv::WriterBuilder::new().delimiter(sep).from_writer(writer);
    csv_writer.write_record(table.column_names())?;

    for row in 0..table.num_rows() {
        let cells: Vec<String> = table.row(row).iter().map(|v| v.to_string()).collect();
        csv_writer.write_record(&cells)?;
    }

    csv_writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use std::fs;

    fn sample() -> Table {
        Table::new(vec![
            ("Political Entity".to_string(), Column::Text(vec![Some("PopX".into()), None])),
            ("Lat.".to_string(), Column::Float(vec![Some(10.0), Some(-3.5)])),
            ("Years BP".to_string(), Column::Int(vec![Some(5000), Some(0)])),
        ])
    }

    #[test]
    fn test_write_table_format() {
        let mut out = Vec::new();
        write_table(&sample(), &mut out, Delimiter::TAB).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Political Entity\tLat.\tYears BP\nPopX\t10.0\t5000\n\t-3.5\t0\n");
    }

    #[test]
    fn test_fields_containing_separator_are_quoted() {
        let table = Table::new(vec![(
            "name".to_string(),
            Column::Text(vec![Some("a\tb".into()), Some("say \"hi\"".into())]),
        )]);
        let mut out = Vec::new();
        write_table(&table, &mut out, Delimiter::TAB).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name\n\"a\tb\"\n\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_quoted_text_reads_back_unchanged() {
        use crate::io::delimited::{read_table, LoadOptions};

        let names = Column::Text(vec![
            Some("Bosnia\tand Herzegovina".into()),
            Some("\"PopX\"".into()),
            Some("Peru".into()),
        ]);
        let table = Table::new(vec![("Political Entity".to_string(), names.clone())]);
        let mut out = Vec::new();
        write_table(&table, &mut out, Delimiter::TAB).unwrap();

        let read_back = read_table(out.as_slice(), "roundtrip", &LoadOptions::new(Delimiter::TAB)).unwrap();
        assert_eq!(read_back.column("Political Entity"), Some(&names));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_indivs_mapped");
        fs::write(&path, "stale contents\n").unwrap();

        write(&sample(), path.to_str().unwrap(), Delimiter::TAB).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Political Entity\tLat.\tYears BP\n"));
        assert!(!contents.contains("stale"));
        // Only the output itself remains, no temporary files
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.tsv");
        let err = write(&sample(), path.to_str().unwrap(), Delimiter::TAB).unwrap_err();
        assert!(matches!(err, MergeError::Io { stage: Stage::Write, .. }));
    }
}
