use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::config::ReportConfig;
use crate::report::ReportKind;

/// Draw comparison charts from benchmark result tables.
///
/// Without arguments every report is drawn from `results/` into the current
/// directory, then shown in a window.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Only draw these reports (repeatable). Default: all of them.
    #[arg(short, long = "report", value_name = "REPORT")]
    pub reports: Vec<ReportKind>,
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    /// Write the PDFs without opening the viewer.
    #[arg(long)]
    pub no_show: bool,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Command line flags take precedence over the config file.
    pub fn apply(&self, config: &mut ReportConfig) {
        if let Some(dir) = &self.results_dir {
            config.results_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.no_show {
            config.show = false;
        }
    }

    /// Requested reports in command line order, without repeats.
    pub fn selected_reports(&self) -> Vec<ReportKind> {
        if self.reports.is_empty() {
            return ReportKind::ALL.to_vec();
        }
        let mut selected = Vec::with_capacity(self.reports.len());
        for kind in &self.reports {
            if !selected.contains(kind) {
                selected.push(*kind);
            }
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_runs_everything_with_defaults() {
        let cli = Cli::try_parse_from(["colgen-report"]).unwrap();
        assert_eq!(cli.selected_reports(), ReportKind::ALL);
        assert_eq!(cli.log_level, LevelFilter::Info);

        let mut config = ReportConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "colgen-report",
            "-r",
            "mip-vs-dp",
            "--report",
            "single-vs-multi",
            "-r",
            "mip-vs-dp",
            "--results-dir",
            "bench",
            "-o",
            "figures",
            "--no-show",
        ])
        .unwrap();
        assert_eq!(
            cli.selected_reports(),
            [ReportKind::MipVsDp, ReportKind::SingleVsMulti]
        );

        let mut config = ReportConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.results_dir, PathBuf::from("bench"));
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert!(!config.show);
    }

    #[test]
    fn unknown_report_is_rejected() {
        assert!(Cli::try_parse_from(["colgen-report", "-r", "nope"]).is_err());
    }
}
