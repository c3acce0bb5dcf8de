use std::fmt;

use clap::ValueEnum;

use crate::chart::Scale;
use crate::data::filter::RowFilter;

/// The comparisons this tool knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum ReportKind {
    /// One column vs. one column per pricing subproblem.
    SingleVsMulti,
    /// MIP pricing vs. dynamic-programming pricing.
    MipVsDp,
    /// No stabilization vs. in-out dual stabilization.
    WithoutVsWithInout,
    /// Compact MIP model vs. its LP relaxation.
    CompactModel,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::SingleVsMulti,
        ReportKind::MipVsDp,
        ReportKind::WithoutVsWithInout,
        ReportKind::CompactModel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReportKind::SingleVsMulti => "single-vs-multi",
            ReportKind::MipVsDp => "mip-vs-dp",
            ReportKind::WithoutVsWithInout => "without-vs-with-inout",
            ReportKind::CompactModel => "compact-model",
        }
    }

    pub fn definition(self) -> ReportDefinition {
        match self {
            ReportKind::SingleVsMulti => SINGLE_VS_MULTI,
            ReportKind::MipVsDp => MIP_VS_DP,
            ReportKind::WithoutVsWithInout => WITHOUT_VS_WITH_INOUT,
            ReportKind::CompactModel => COMPACT_MODEL,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Report definitions
// ---------------------------------------------------------------------------

/// One bar series: legend name and source column (after renaming).
#[derive(Debug, Clone, Copy)]
pub struct SeriesSpec {
    pub name: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct PanelSpec {
    pub title: &'static str,
    pub y_label: &'static str,
    pub scale: Scale,
    pub series: &'static [SeriesSpec],
}

/// Which rows count as usable for a report.
#[derive(Debug, Clone, Copy)]
pub enum RowSelection {
    /// Drop rows where any of these value columns hit the time limit.
    Solved(&'static [&'static str]),
    /// Keep rows whose status column holds one of the listed values.
    Status {
        column: &'static str,
        accepted: &'static [&'static str],
    },
}

impl RowSelection {
    pub fn filters(self) -> Vec<RowFilter> {
        match self {
            RowSelection::Solved(columns) => columns.iter().map(|c| RowFilter::solved(c)).collect(),
            RowSelection::Status { column, accepted } => vec![RowFilter::one_of(column, accepted)],
        }
    }
}

/// Everything that distinguishes one report from another.
#[derive(Debug, Clone, Copy)]
pub struct ReportDefinition {
    pub kind: ReportKind,
    /// File name inside the results directory.
    pub input_file: &'static str,
    /// File name inside the output directory.
    pub output_file: &'static str,
    pub title: &'static str,
    /// Harness headers → report column names, applied in order.
    pub renames: &'static [(&'static str, &'static str)],
    pub selection: RowSelection,
    pub x_label: &'static str,
    pub panels: &'static [PanelSpec],
}

const INSTANCE_ID: &str = "Instance ID";
const COLUMNS_LOG: &str = "Number of columns (log scale)";
const TIME: &str = "Time (s)";

const SINGLE_VS_MULTI: ReportDefinition = ReportDefinition {
    kind: ReportKind::SingleVsMulti,
    input_file: "single_vs_multi.csv",
    output_file: "comparaison_single_multi.pdf",
    title: "SINGLE vs MULTI column strategy",
    renames: &[
        ("Nb cols", "Nb cols Single"),
        ("Durations(s)", "Durations(s) Single"),
        ("Nb cols.1", "Nb cols Multi"),
        ("Duration(s)", "Duration(s) Multi"),
    ],
    selection: RowSelection::Solved(&["SINGLE Value"]),
    x_label: INSTANCE_ID,
    panels: &[
        PanelSpec {
            title: "Generated columns",
            y_label: COLUMNS_LOG,
            scale: Scale::Log,
            series: &[
                SeriesSpec { name: "SINGLE", column: "Nb cols Single" },
                SeriesSpec { name: "MULTI", column: "Nb cols Multi" },
            ],
        },
        PanelSpec {
            title: "Execution time",
            y_label: TIME,
            scale: Scale::Linear,
            series: &[
                SeriesSpec { name: "SINGLE", column: "Durations(s) Single" },
                SeriesSpec { name: "MULTI", column: "Duration(s) Multi" },
            ],
        },
    ],
};

const MIP_VS_DP: ReportDefinition = ReportDefinition {
    kind: ReportKind::MipVsDp,
    input_file: "mip_vs_dp.csv",
    output_file: "comparaison_mip_dp.pdf",
    title: "MIP vs DP pricing",
    renames: &[
        ("Nb cols", "Nb cols MIP"),
        ("Durations(s)", "Duration(s) MIP"),
        ("Nb cols.1", "Nb cols DP"),
        ("Duration(s)", "Duration(s) DP"),
    ],
    selection: RowSelection::Solved(&["MIP Value", "DP Value"]),
    x_label: INSTANCE_ID,
    panels: &[
        PanelSpec {
            title: "Generated columns",
            y_label: COLUMNS_LOG,
            scale: Scale::Log,
            series: &[
                SeriesSpec { name: "MIP", column: "Nb cols MIP" },
                SeriesSpec { name: "DP", column: "Nb cols DP" },
            ],
        },
        PanelSpec {
            title: "Execution time",
            y_label: TIME,
            scale: Scale::Linear,
            series: &[
                SeriesSpec { name: "MIP", column: "Duration(s) MIP" },
                SeriesSpec { name: "DP", column: "Duration(s) DP" },
            ],
        },
    ],
};

const WITHOUT_VS_WITH_INOUT: ReportDefinition = ReportDefinition {
    kind: ReportKind::WithoutVsWithInout,
    input_file: "without_vs_with_inout.csv",
    output_file: "comparaison_without_with_inout.pdf",
    title: "Without vs with in-out stabilization",
    renames: &[
        ("Nb cols", "Nb cols NOSTAB"),
        ("Durations(s)", "Duration(s) NOSTAB"),
        ("Nb cols.1", "Nb cols INOUT"),
        ("Duration(s)", "Duration(s) INOUT"),
    ],
    selection: RowSelection::Solved(&["NOSTAB Value", "INOUT Value"]),
    x_label: INSTANCE_ID,
    panels: &[
        PanelSpec {
            title: "Generated columns",
            y_label: "Number of columns",
            scale: Scale::Linear,
            series: &[
                SeriesSpec { name: "Without", column: "Nb cols NOSTAB" },
                SeriesSpec { name: "In-out", column: "Nb cols INOUT" },
            ],
        },
        PanelSpec {
            title: "Execution time",
            y_label: TIME,
            scale: Scale::Linear,
            series: &[
                SeriesSpec { name: "Without", column: "Duration(s) NOSTAB" },
                SeriesSpec { name: "In-out", column: "Duration(s) INOUT" },
            ],
        },
    ],
};

const COMPACT_MODEL: ReportDefinition = ReportDefinition {
    kind: ReportKind::CompactModel,
    input_file: "compact_model.csv",
    output_file: "comparaison_compact_model.pdf",
    title: "Compact model vs LP relaxation",
    renames: &[
        ("Duration(s)", "Duration(s) MIP"),
        ("Duration(s).1", "Duration(s) Relax"),
    ],
    selection: RowSelection::Status {
        column: "Opt Found?",
        accepted: &["YES", "NO"],
    },
    x_label: INSTANCE_ID,
    panels: &[
        PanelSpec {
            title: "Gap to best solution",
            y_label: "Gap (%)",
            scale: Scale::Linear,
            series: &[
                SeriesSpec { name: "MIP", column: "Gap" },
                SeriesSpec { name: "LP relaxation", column: "Relax Gap" },
            ],
        },
        PanelSpec {
            title: "Execution time",
            y_label: TIME,
            scale: Scale::Linear,
            series: &[
                SeriesSpec { name: "MIP", column: "Duration(s) MIP" },
                SeriesSpec { name: "LP relaxation", column: "Duration(s) Relax" },
            ],
        },
    ],
};
