use crate::config::{
    MergeConfig, DATE_MEAN_COLUMN, DISTANCE_COLUMN, GENETIC_ID_COLUMN, KEY_COLUMN, OUTPUT_COLUMNS,
    YEARS_BP_COLUMN,
};
use crate::error::{MergeError, Result, Stage};
use crate::io::delimited::{load, LoadOptions};
use crate::io::writer::{commit, write};
use crate::ops::{join, project, rename, JoinSuffixes};
use crate::stats::MergeSummary;
use crate::table::Table;
use std::time::Instant;
use tracing::info;

/// Load the distance and annotation tables named by `config`.
///
/// Identifier columns are kept as text so that IDs are compared exactly.
pub fn load_inputs(config: &MergeConfig) -> Result<(Table, Table)> {
    let distance_options = LoadOptions::new(config.distance_delimiter).with_text_column(KEY_COLUMN);
    let distances = load(&config.distance_path, &distance_options)?;

    let annotation_options = LoadOptions::new(config.annotation_delimiter).with_text_column(GENETIC_ID_COLUMN);
    let annotations = load(&config.annotation_path, &annotation_options)?;

    Ok((distances, annotations))
}

fn require_column(table: &Table, column: &str, stage: Stage, table_name: &str) -> Result<()> {
    match table.position(column) {
        Some(_) => Ok(()),
        None => Err(MergeError::missing_column(stage, table_name, column)),
    }
}

/// Rename, join and project already loaded tables.
///
/// Returns the five-column output table and the row/individual summary.
/// `distance_name` and `annotation_name` identify the inputs in errors.
pub fn merge_tables(
    distances: &Table,
    annotations: Table,
    distance_name: &str,
    annotation_name: &str,
) -> Result<(Table, MergeSummary)> {
    require_column(distances, KEY_COLUMN, Stage::Join, distance_name)?;
    require_column(distances, DISTANCE_COLUMN, Stage::Project, distance_name)?;

    let annotations = rename(
        annotations,
        &[(GENETIC_ID_COLUMN, KEY_COLUMN), (DATE_MEAN_COLUMN, YEARS_BP_COLUMN)],
        annotation_name,
    )?;

    let merged = join(distances, &annotations, KEY_COLUMN, &JoinSuffixes::default())?;
    let summary = MergeSummary::compute(distances, &annotations, &merged, KEY_COLUMN);

    let output = project(&merged, &OUTPUT_COLUMNS, "merged table")?;
    Ok((output, summary))
}

/// Run the whole merge: load, rename, join, project, write.
///
/// The output file is only touched once every earlier stage has succeeded. The
/// summary, when requested, is fully written before the output is replaced and
/// moved into place right after it.
pub fn run(config: &MergeConfig) -> Result<MergeSummary> {
    let start = Instant::now();

    let (distances, annotations) = load_inputs(config)?;
    let (output, summary) = merge_tables(
        &distances,
        annotations,
        &config.distance_path,
        &config.annotation_path,
    )?;
    summary.log();

    let staged_summary = match &config.summary_path {
        Some(path) => Some((path, summary.stage_json(path)?)),
        None => None,
    };

    write(&output, &config.output_path, config.output_delimiter)?;
    if let Some((path, tmp)) = staged_summary {
        commit(tmp, path)?;
        info!("Summary written to {}", path);
    }

    info!("Merge completed in {:.2?}", start.elapsed());
    Ok(summary)
}
