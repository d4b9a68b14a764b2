use clap::Parser;
use indiv_mapper::config::{MergeConfig, DEFAULT_ANNOTATION_PATH, DEFAULT_DISTANCE_PATH, DEFAULT_OUTPUT_PATH};
use indiv_mapper::io::Delimiter;

/// Every option defaults to the published file layout, so a bare invocation
/// in the data directory reproduces the standard merge.
#[derive(Parser, Debug)]
#[command(name = "indiv-mapper", version, about = "Map genetic distances onto individual annotations", long_about = None)]
pub struct Cli {
    /// Pairwise distance table (needs IID2 and DST columns)
    #[arg(short, long, default_value = DEFAULT_DISTANCE_PATH)]
    pub distances: String,

    /// EIGENSTRAT annotation table (.anno, optionally .gz)
    #[arg(short, long, default_value = DEFAULT_ANNOTATION_PATH)]
    pub annotations: String,

    /// Output table
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// Distance table separator: a character, 'space', 'tab' or 'whitespace'
    #[arg(long, default_value = "space")]
    pub distance_sep: Delimiter,

    /// Annotation table separator
    #[arg(long, default_value = "tab")]
    pub annotation_sep: Delimiter,

    /// Output separator
    #[arg(long, default_value = "tab")]
    pub output_sep: Delimiter,

    /// Write row and individual counts as JSON
    #[arg(long)]
    pub summary: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> MergeConfig {
        MergeConfig {
            distance_path: self.distances,
            annotation_path: self.annotations,
            output_path: self.output,
            distance_delimiter: self.distance_sep,
            annotation_delimiter: self.annotation_sep,
            output_delimiter: self.output_sep,
            summary_path: self.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_gives_default_config() {
        let cli = Cli::try_parse_from(["indiv-mapper"]).unwrap();
        let config = cli.into_config();
        let defaults = MergeConfig::default();
        assert_eq!(config.distance_path, defaults.distance_path);
        assert_eq!(config.annotation_path, defaults.annotation_path);
        assert_eq!(config.output_path, defaults.output_path);
        assert_eq!(config.distance_delimiter, defaults.distance_delimiter);
        assert_eq!(config.annotation_delimiter, defaults.annotation_delimiter);
        assert_eq!(config.output_delimiter, defaults.output_delimiter);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "indiv-mapper",
            "--distances",
            "plink.genome",
            "--distance-sep",
            "whitespace",
            "-o",
            "out.tsv.gz",
            "--summary",
            "summary.json",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.distance_path, "plink.genome");
        assert_eq!(config.distance_delimiter, Delimiter::Whitespace);
        assert_eq!(config.output_path, "out.tsv.gz");
        assert_eq!(config.summary_path.as_deref(), Some("summary.json"));
    }
}
