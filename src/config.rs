use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::DEFAULT_SERIES_COLORS;

/// Settings shared by every report. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory holding the `*.csv` result tables.
    pub results_dir: PathBuf,
    /// Directory the PDFs are written to.
    pub output_dir: PathBuf,
    /// Base font size in points.
    pub font_size: f32,
    pub figure_width_mm: f32,
    pub figure_height_mm: f32,
    /// Series colours as `#rrggbb`, in variant order.
    pub colors: Vec<String>,
    /// Open the viewer once the PDFs are written.
    pub show: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            output_dir: PathBuf::from("."),
            font_size: 11.0,
            // 12 x 5 inches
            figure_width_mm: 304.8,
            figure_height_mm: 127.0,
            colors: DEFAULT_SERIES_COLORS.iter().map(|c| c.to_string()).collect(),
            show: true,
        }
    }
}

impl ReportConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("could not open config file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file)).context("incorrect config file format")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "output_dir": "figures", "font_size": 9.5 }}"#).unwrap();
        let config = ReportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert_eq!(config.font_size, 9.5);
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.colors, ["#4c72b0", "#c44e52"]);
        assert!(config.show);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ReportConfig::from_file(file.path()).is_err());
    }
}
