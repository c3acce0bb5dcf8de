use anyhow::{bail, Result};
use clap::Parser;
use log::{error, info, warn, LevelFilter};

use colgen_report::app;
use colgen_report::cli::Cli;
use colgen_report::config::ReportConfig;
use colgen_report::report::run_report;
use colgen_report::state::ViewerState;

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.log_level);

    let mut config = match &args.config_file {
        None => ReportConfig::default(),
        Some(path) => ReportConfig::from_file(path)?,
    };
    args.apply(&mut config);
    info!("using {config:?}");

    let mut state = ViewerState::default();
    let mut failures = 0;
    for kind in args.selected_reports() {
        match run_report(kind, &config) {
            Ok(outcome) => state.push_outcome(kind, outcome),
            Err(e) => {
                error!("[{kind}] {e:#}");
                state.push_failure(kind, &e);
                failures += 1;
            }
        }
    }

    if config.show && state.has_figures() {
        if let Err(e) = app::run_viewer(state) {
            warn!("could not open the viewer: {e:#}");
        }
    }

    if failures > 0 {
        bail!("{failures} report(s) failed");
    }
    Ok(())
}

/// `RUST_LOG`, when set, refines the level given on the command line.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
