//! Writes synthetic result tables in the benchmark harness format, so the
//! reports can be drawn without running the solver.
//!
//! Usage: `generate-sample [OUTPUT_DIR]` (default `results`).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const N_INSTANCES: u32 = 12;
const TIME_LIMIT: f64 = 60.0;
const CRASH_PROBABILITY: f64 = 0.05;

/// How a variant scales with instance size: columns and seconds per instance
/// number, each with multiplicative noise.
#[derive(Debug, Clone, Copy)]
struct VariantModel {
    cols_per_size: f64,
    secs_per_size: f64,
    growth: f64,
}

impl VariantModel {
    fn run(&self, size: f64, rng: &mut StdRng) -> (u64, f64) {
        let noise = |rng: &mut StdRng| rng.gen_range(0.7..1.3);
        let scale = size.powf(self.growth);
        let cols = (self.cols_per_size * scale * noise(rng)).round().max(1.0) as u64;
        let secs = self.secs_per_size * scale * noise(rng);
        (cols, secs)
    }
}

/// A two-variant comparison file written by the harness.
struct Comparison {
    file: &'static str,
    header: [&'static str; 7],
    /// Fields on a `CRASH` line. The harness writes five for
    /// single_vs_multi and six for the other comparisons.
    crash_fields: usize,
    a: VariantModel,
    b: VariantModel,
}

const COMPARISONS: [Comparison; 3] = [
    Comparison {
        file: "single_vs_multi.csv",
        header: ["Instance", "SINGLE Value", "Nb cols", " Durations(s)", "MULTI Value", "Nb cols", "Duration(s)"],
        crash_fields: 5,
        a: VariantModel { cols_per_size: 8.0, secs_per_size: 0.15, growth: 2.0 },
        b: VariantModel { cols_per_size: 30.0, secs_per_size: 0.08, growth: 1.8 },
    },
    Comparison {
        file: "mip_vs_dp.csv",
        header: ["Instance", "MIP Value", "Nb cols", " Durations(s)", "DP Value", "Nb cols", "Duration(s)"],
        crash_fields: 6,
        a: VariantModel { cols_per_size: 30.0, secs_per_size: 0.2, growth: 1.9 },
        b: VariantModel { cols_per_size: 30.0, secs_per_size: 0.03, growth: 1.7 },
    },
    Comparison {
        file: "without_vs_with_inout.csv",
        header: ["Instance", "NOSTAB Value", "Nb cols", " Durations(s)", "INOUT Value", "Nb cols", "Duration(s)"],
        crash_fields: 6,
        a: VariantModel { cols_per_size: 30.0, secs_per_size: 0.03, growth: 1.7 },
        b: VariantModel { cols_per_size: 18.0, secs_per_size: 0.02, growth: 1.6 },
    },
];

/// `812.0000`, or `812.0000(TLR)` when the run exceeded the time limit.
fn value_cell(value: f64, secs: f64) -> String {
    let marker = if secs > TIME_LIMIT { "(TLR)" } else { "" };
    format!("{value:.4}{marker}")
}

/// `uniform_3;CRASH;;;` padded with empty cells to `fields` fields.
fn write_crash<W: Write>(writer: &mut csv::Writer<W>, instance: &str, fields: usize) -> Result<()> {
    let mut record = vec![instance, "CRASH"];
    record.resize(fields.max(2), "");
    writer.write_record(&record)?;
    Ok(())
}

fn write_comparison(dir: &Path, cmp: &Comparison, rng: &mut StdRng) -> Result<PathBuf> {
    let path = dir.join(cmp.file);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(cmp.header)?;

    for n in 1..=N_INSTANCES {
        let instance = format!("uniform_{n}");
        if rng.gen_bool(CRASH_PROBABILITY) {
            write_crash(&mut writer, &instance, cmp.crash_fields)?;
            continue;
        }
        let size = f64::from(n);
        let objective = 100.0 * size * rng.gen_range(0.9..1.1);
        let (a_cols, a_secs) = cmp.a.run(size, rng);
        let (b_cols, b_secs) = cmp.b.run(size, rng);
        writer.write_record([
            instance,
            value_cell(objective, a_secs),
            a_cols.to_string(),
            format!("{:.2}", a_secs.min(TIME_LIMIT + 0.5)),
            value_cell(objective * rng.gen_range(0.98..1.0), b_secs),
            b_cols.to_string(),
            format!("{:.2}", b_secs.min(TIME_LIMIT + 0.5)),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

fn write_compact_model(dir: &Path, rng: &mut StdRng) -> Result<PathBuf> {
    let path = dir.join("compact_model.csv");
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "Instance",
        "Opt Found?",
        "Best Sol",
        "Dual Bound",
        "Gap",
        "Duration(s)",
        " Relax Sol",
        " Relax Gap",
        " Duration(s)",
    ])?;

    for n in 1..=N_INSTANCES {
        let instance = format!("uniform_{n}");
        if rng.gen_bool(CRASH_PROBABILITY) {
            writer.write_record([instance.as_str(), "NO_SOL", "", "", "", "", "", ""])?;
            continue;
        }
        let size = f64::from(n);
        let best = 100.0 * size * rng.gen_range(0.9..1.1);
        let secs = 0.05 * size.powf(3.0) * rng.gen_range(0.7..1.3);
        let optimal = secs < 600.0;
        let gap = if optimal { 0.0 } else { rng.gen_range(0.01..0.15) };
        let relax = best * rng.gen_range(0.75..0.95);
        writer.write_record([
            instance,
            (if optimal { "YES" } else { "NO" }).to_string(),
            format!("{best:.4}"),
            format!("{:.4}", best * (1.0 - gap)),
            format!("{:.2}%", gap * 100.0),
            format!("{:.4}", secs.min(600.0)),
            format!("{relax:.4}"),
            format!("{:.2}%", (best - relax) / best * 100.0),
            format!("{:.4}", 0.002 * size * rng.gen_range(0.7..1.3)),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

/// Write every result table into `dir`, returning the paths written.
fn generate(dir: &Path, seed: u64) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut written = Vec::with_capacity(COMPARISONS.len() + 1);
    for cmp in &COMPARISONS {
        written.push(write_comparison(dir, cmp, &mut rng)?);
    }
    written.push(write_compact_model(dir, &mut rng)?);
    Ok(written)
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("results"));

    for path in generate(&dir, 42)? {
        println!("Wrote {N_INSTANCES} instances to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colgen_report::config::ReportConfig;
    use colgen_report::report::{run_report, ReportKind, ReportOutcome};

    #[test]
    fn crash_lines_keep_the_harness_width() {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_writer(vec![]);
        write_crash(&mut writer, "uniform_3", 5).unwrap();
        write_crash(&mut writer, "uniform_4", 6).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "uniform_3;CRASH;;;\nuniform_4;CRASH;;;;\n");
    }

    #[test]
    fn generated_tables_draw_every_report() {
        let root = tempfile::tempdir().unwrap();
        let results = root.path().join("results");
        let written = generate(&results, 42).unwrap();
        assert_eq!(written.len(), ReportKind::ALL.len());

        let config = ReportConfig {
            results_dir: results,
            output_dir: root.path().join("out"),
            show: false,
            ..ReportConfig::default()
        };
        for &kind in ReportKind::ALL.iter() {
            match run_report(kind, &config).unwrap() {
                ReportOutcome::Written { path, figure } => {
                    assert!(path.exists(), "{kind}: {} missing", path.display());
                    assert!(!figure.panels[0].categories.is_empty());
                }
                other => panic!("{kind}: unexpected outcome {other:?}"),
            }
        }
    }
}
