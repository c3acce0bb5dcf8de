use std::path::PathBuf;

use crate::chart::Figure;
use crate::report::{ReportKind, ReportOutcome};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// A figure that was written to disk and can be displayed.
#[derive(Debug, Clone)]
pub struct ViewerEntry {
    pub kind: ReportKind,
    pub path: PathBuf,
    pub figure: Figure,
}

/// The full viewer state, independent of rendering.
#[derive(Debug, Default)]
pub struct ViewerState {
    /// Reports that produced a figure, in run order.
    pub entries: Vec<ViewerEntry>,

    /// One line per report describing what happened to it.
    pub summaries: Vec<(ReportKind, String)>,

    /// Index into `entries` of the figure on screen.
    pub selected: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    /// Record the outcome of one report.
    pub fn push_outcome(&mut self, kind: ReportKind, outcome: ReportOutcome) {
        let summary = match outcome {
            ReportOutcome::Written { path, figure } => {
                let line = format!("written to {}", path.display());
                self.entries.push(ViewerEntry { kind, path, figure });
                line
            }
            ReportOutcome::MissingInput { path } => format!("skipped: {} not found", path.display()),
            ReportOutcome::NothingSolved => "skipped: no instance solved".to_string(),
        };
        self.summaries.push((kind, summary));
    }

    /// Record a report that failed with an error.
    pub fn push_failure(&mut self, kind: ReportKind, error: &anyhow::Error) {
        self.summaries.push((kind, format!("failed: {error:#}")));
        self.status_message = Some(format!("{kind} failed"));
    }

    pub fn has_figures(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn current(&self) -> Option<&ViewerEntry> {
        self.entries.get(self.selected)
    }

    /// Show the figure at `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> Figure {
        Figure {
            title: "f".into(),
            panels: Vec::new(),
            width_mm: 100.0,
            height_mm: 50.0,
            font_size: 11.0,
        }
    }

    #[test]
    fn only_written_reports_become_entries() {
        let mut state = ViewerState::default();
        state.push_outcome(
            ReportKind::SingleVsMulti,
            ReportOutcome::Written {
                path: PathBuf::from("a.pdf"),
                figure: figure(),
            },
        );
        state.push_outcome(
            ReportKind::MipVsDp,
            ReportOutcome::MissingInput {
                path: PathBuf::from("results/mip_vs_dp.csv"),
            },
        );
        state.push_outcome(ReportKind::WithoutVsWithInout, ReportOutcome::NothingSolved);

        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.summaries.len(), 3);
        assert!(state.summaries[1].1.contains("not found"));
        assert_eq!(state.current().map(|e| e.kind), Some(ReportKind::SingleVsMulti));
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut state = ViewerState::default();
        state.select(3);
        assert_eq!(state.selected, 0);
        assert!(state.current().is_none());
    }

    #[test]
    fn failures_set_status() {
        let mut state = ViewerState::default();
        state.push_failure(ReportKind::CompactModel, &anyhow::anyhow!("boom"));
        assert_eq!(state.status_message.as_deref(), Some("compact-model failed"));
        assert!(state.summaries[0].1.ends_with("boom"));
    }
}
