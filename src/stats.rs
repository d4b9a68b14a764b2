use crate::error::{MergeError, Result, Stage};
use crate::io::writer::{commit, stage};
use crate::table::{Table, Value};
use ahash::AHashSet;
use serde::Serialize;
use std::io::{BufWriter, Write};
use tempfile::NamedTempFile;
use tracing::info;

/// Row and individual counts for one merge
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub distance_rows: usize,
    pub distance_individuals: usize,
    pub annotation_rows: usize,
    pub annotated_individuals: usize,
    pub output_rows: usize,
    pub matched_individuals: usize,
    pub unmatched_distance_individuals: usize,
}

/// Distinct non-missing values of `column`, rendered as text
pub fn distinct_values(table: &Table, column: &str) -> AHashSet<String> {
    let mut seen = AHashSet::new();
    if let Some(col) = table.column(column) {
        for row in 0..col.len() {
            let value = col.get(row);
            if value != Value::Missing {
                seen.insert(value.to_string());
            }
        }
    }
    seen
}

impl MergeSummary {
    /// Count individuals on both sides of a join on `key`
    pub fn compute(distances: &Table, annotations: &Table, joined: &Table, key: &str) -> Self {
        let distance_ids = distinct_values(distances, key);
        let annotated_ids = distinct_values(annotations, key);
        let matched = distinct_values(joined, key);

        MergeSummary {
            distance_rows: distances.num_rows(),
            distance_individuals: distance_ids.len(),
            annotation_rows: annotations.num_rows(),
            annotated_individuals: annotated_ids.len(),
            output_rows: joined.num_rows(),
            matched_individuals: matched.len(),
            unmatched_distance_individuals: distance_ids.difference(&matched).count(),
        }
    }

    pub fn log(&self) {
        info!(
            "Distance table: {} rows, {} individuals",
            self.distance_rows, self.distance_individuals
        );
        info!(
            "Annotation table: {} rows, {} individuals",
            self.annotation_rows, self.annotated_individuals
        );
        info!(
            "Mapped {} rows covering {} individuals ({} distance individuals without annotation)",
            self.output_rows, self.matched_individuals, self.unmatched_distance_individuals
        );
    }

    /// Serialize as pretty JSON into `writer` and flush it. `path` names it in errors.
    pub fn write_json_to<W: Write>(&self, writer: W, path: &str) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| MergeError::Summary {
            path: path.to_string(),
            source: e,
        })?;
        writer.flush().map_err(|e| MergeError::Io {
            stage: Stage::Write,
            path: path.to_string(),
            source: e,
        })
    }

    /// Write the JSON into a temporary file next to `path`, ready for [`commit`]
    pub fn stage_json(&self, path: &str) -> Result<NamedTempFile> {
        let mut tmp = stage(path)?;
        self.write_json_to(tmp.as_file_mut(), path)?;
        Ok(tmp)
    }

    /// Write the summary as pretty JSON, replacing `path` atomically
    pub fn write_json(&self, path: &str) -> Result<()> {
        let tmp = self.stage_json(path)?;
        commit(tmp, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use std::fs::File;
    use std::io::{self, Read};

    /// Accepts nothing, like a device with no space left
    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn ids(values: &[&str]) -> Table {
        Table::new(vec![(
            "IID2".to_string(),
            Column::Text(values.iter().map(|v| Some(v.to_string())).collect()),
        )])
    }

    #[test]
    fn test_compute_counts() {
        let distances = ids(&["A1", "A1", "B2", "C3"]);
        let annotations = ids(&["A1", "C3", "Z9"]);
        let joined = ids(&["A1", "A1", "C3"]);

        let summary = MergeSummary::compute(&distances, &annotations, &joined, "IID2");
        assert_eq!(summary.distance_rows, 4);
        assert_eq!(summary.distance_individuals, 3);
        assert_eq!(summary.annotated_individuals, 3);
        assert_eq!(summary.output_rows, 3);
        assert_eq!(summary.matched_individuals, 2);
        assert_eq!(summary.unmatched_distance_individuals, 1);
    }

    #[test]
    fn test_write_json() {
        let summary = MergeSummary::compute(&ids(&["A1"]), &ids(&["A1"]), &ids(&["A1"]), "IID2");
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        summary.write_json(path).unwrap();

        let mut contents = String::new();
        File::open(path).unwrap().read_to_string(&mut contents).unwrap();
        assert!(contents.contains("\"output_rows\": 1"));
        assert!(contents.contains("\"matched_individuals\": 1"));
    }

    #[test]
    fn test_write_failure_on_flush_is_reported() {
        let summary = MergeSummary::compute(&ids(&["A1"]), &ids(&["A1"]), &ids(&["A1"]), "IID2");

        // The JSON fits in the buffer, so the device error only surfaces on flush
        let err = summary.write_json_to(FullDevice, "summary.json").unwrap_err();
        assert!(matches!(err, MergeError::Io { stage: Stage::Write, .. }));
    }

    #[test]
    fn test_write_json_into_missing_directory_fails() {
        let summary = MergeSummary::compute(&ids(&["A1"]), &ids(&["A1"]), &ids(&["A1"]), "IID2");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.json");

        let err = summary.write_json(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.stage(), Stage::Write);
    }
}
