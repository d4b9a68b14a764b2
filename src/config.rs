use crate::io::Delimiter;

/// Join key shared by both tables after renaming
pub const KEY_COLUMN: &str = "IID2";
pub const DISTANCE_COLUMN: &str = "DST";

/// Annotation identifier column, renamed to `KEY_COLUMN`
pub const GENETIC_ID_COLUMN: &str = "Genetic ID";
pub const POLITICAL_ENTITY_COLUMN: &str = "Political Entity";
pub const LATITUDE_COLUMN: &str = "Lat.";
pub const LONGITUDE_COLUMN: &str = "Long.";

/// Mean date header as published in the v54.1 annotation release; must match verbatim
pub const DATE_MEAN_COLUMN: &str = "Date mean in BP in years before 1950 CE [OxCal mu for a direct radiocarbon date, and average of range for a contextual date]";
pub const YEARS_BP_COLUMN: &str = "Years BP";

/// Output columns, in output order
pub const OUTPUT_COLUMNS: [&str; 5] = [
    POLITICAL_ENTITY_COLUMN,
    LATITUDE_COLUMN,
    LONGITUDE_COLUMN,
    DISTANCE_COLUMN,
    YEARS_BP_COLUMN,
];

pub const DEFAULT_DISTANCE_PATH: &str = "new_distances.txt";
pub const DEFAULT_ANNOTATION_PATH: &str = "v54.1.p1_1240K_public.anno";
pub const DEFAULT_OUTPUT_PATH: &str = "all_indivs_mapped";

/// Inputs, output and delimiters for one merge run
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub distance_path: String,
    pub annotation_path: String,
    pub output_path: String,
    pub distance_delimiter: Delimiter,
    pub annotation_delimiter: Delimiter,
    pub output_delimiter: Delimiter,
    /// Optional JSON summary of row and individual counts
    pub summary_path: Option<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            distance_path: DEFAULT_DISTANCE_PATH.to_string(),
            annotation_path: DEFAULT_ANNOTATION_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            distance_delimiter: Delimiter::SPACE,
            annotation_delimiter: Delimiter::TAB,
            output_delimiter: Delimiter::TAB,
            summary_path: None,
        }
    }
}
