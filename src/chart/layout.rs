use crate::color::Rgb8;

/// Horizontal space taken by one category's group of bars, in category units.
pub const GROUP_WIDTH: f64 = 0.7;

/// Approximate number of ticks on a linear axis.
const TARGET_TICKS: f64 = 5.0;

// ---------------------------------------------------------------------------
// Figure model (backend independent)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Log,
}

/// One variant's bars, one value per category (NaN = no bar).
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub color: Rgb8,
}

/// A grouped bar chart.
#[derive(Debug, Clone)]
pub struct BarPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub scale: Scale,
}

/// A page of panels laid out side by side.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<BarPanel>,
    pub width_mm: f32,
    pub height_mm: f32,
    pub font_size: f32,
}

impl BarPanel {
    pub fn bar_width(&self) -> f64 {
        GROUP_WIDTH / self.series.len().max(1) as f64
    }

    /// Offset of series `idx` from its category position. With two series
    /// the bars sit at ±width/2.
    pub fn bar_offset(&self, idx: usize) -> f64 {
        let center = (self.series.len().max(1) - 1) as f64 / 2.0;
        (idx as f64 - center) * self.bar_width()
    }

    /// Visible x range: half a category of margin on each side.
    pub fn x_range(&self) -> (f64, f64) {
        (-0.5, self.categories.len().max(1) as f64 - 0.5)
    }

    /// Y axis fitted to the finite values of every series.
    pub fn y_axis(&self) -> Axis {
        let values = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite());
        match self.scale {
            Scale::Linear => Axis::linear(values.fold(0.0, f64::max)),
            Scale::Log => {
                let (min_pos, max) = values
                    .filter(|v| *v > 0.0)
                    .fold((f64::INFINITY, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
                Axis::log(min_pos, max)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// A value axis. On log axes `min`/`max` are data values, not exponents.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub scale: Scale,
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Axis from 0 to a "nice" bound above `max_value`, steps of 1, 2 or 5 × 10^k.
    pub fn linear(max_value: f64) -> Axis {
        let max_value = if max_value.is_finite() && max_value > 0.0 {
            max_value
        } else {
            1.0
        };
        let step = nice_step(max_value / TARGET_TICKS);
        let mut top = (max_value / step).ceil() * step;
        // keep the tallest bar off the frame
        if top < max_value * 1.05 {
            top += step;
        }
        let n = (top / step).round() as usize;
        let ticks = (0..=n)
            .map(|i| {
                let value = i as f64 * step;
                Tick {
                    value,
                    label: format_linear(value, step),
                }
            })
            .collect();
        Axis {
            scale: Scale::Linear,
            min: 0.0,
            max: top,
            ticks,
        }
    }

    /// Axis spanning whole decades around `[min_positive, max]`. The floor
    /// stays strictly below the smallest value so that every bar has height.
    pub fn log(min_positive: f64, max: f64) -> Axis {
        let (lo, mut hi) = if min_positive.is_finite() && min_positive > 0.0 && max >= min_positive {
            let low_exp = min_positive.log10();
            let mut lo = low_exp.floor() as i32;
            if low_exp - f64::from(lo) < 1e-9 {
                lo -= 1;
            }
            (lo, max.log10().ceil() as i32)
        } else {
            (0, 1)
        };
        if hi <= lo {
            hi = lo + 1;
        }
        let ticks = (lo..=hi)
            .map(|k| Tick {
                value: 10f64.powi(k),
                label: format_decade(k),
            })
            .collect();
        Axis {
            scale: Scale::Log,
            min: 10f64.powi(lo),
            max: 10f64.powi(hi),
            ticks,
        }
    }

    /// Position of `value` along the axis in `[0, 1]` (clamped). `None` when
    /// the value cannot be drawn: NaN, or non-positive on a log axis.
    pub fn fraction(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let f = match self.scale {
            Scale::Linear => (value - self.min) / (self.max - self.min),
            Scale::Log => {
                if value <= 0.0 {
                    return None;
                }
                let (lo, hi) = (self.min.log10(), self.max.log10());
                (value.log10() - lo) / (hi - lo)
            }
        };
        Some(f.clamp(0.0, 1.0))
    }
}

/// Smallest of 1, 2, 5, 10 × 10^k that is at least `raw`.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_linear(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{value:.0}")
    } else {
        let decimals = (-step.log10()).ceil() as usize;
        format!("{value:.decimals$}")
    }
}

/// `10^k` written out for small exponents, `1e{k}` beyond.
pub fn format_decade(k: i32) -> String {
    match k {
        0..=5 => format!("{}", 10u64.pow(k as u32)),
        -4..=-1 => format!("{:.*}", (-k) as usize, 10f64.powi(k)),
        _ => format!("1e{k}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn panel(series: usize, scale: Scale, values: &[f64]) -> BarPanel {
        BarPanel {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            categories: (0..values.len()).map(|i| i.to_string()).collect(),
            series: (0..series)
                .map(|i| Series {
                    name: format!("s{i}"),
                    values: values.to_vec(),
                    color: Rgb8::new(0, 0, 0),
                })
                .collect(),
            scale,
        }
    }

    #[test]
    fn two_series_sit_at_half_width_offsets() {
        let p = panel(2, Scale::Linear, &[1.0, 2.0]);
        assert!((p.bar_width() - 0.35).abs() < 1e-12);
        assert!((p.bar_offset(0) + 0.175).abs() < 1e-12);
        assert!((p.bar_offset(1) - 0.175).abs() < 1e-12);
        assert_eq!(p.x_range(), (-0.5, 1.5));
    }

    #[test_case(0.9, 0.2; "below one")]
    #[test_case(7.0, 2.0; "single digit")]
    #[test_case(48.0, 10.0; "tens")]
    #[test_case(600.0, 200.0; "hundreds")]
    fn linear_steps_are_nice(max: f64, step: f64) {
        let axis = Axis::linear(max);
        let got = axis.ticks[1].value - axis.ticks[0].value;
        assert!((got - step).abs() < 1e-9, "step {got} for max {max}");
        assert!(axis.max >= max);
        assert_eq!(axis.ticks[0].value, 0.0);
    }

    #[test]
    fn linear_axis_of_nothing_is_unit() {
        let axis = Axis::linear(f64::NAN);
        assert_eq!(axis.min, 0.0);
        assert!(axis.max >= 1.0);
    }

    #[test]
    fn log_axis_covers_whole_decades() {
        let axis = Axis::log(3.0, 1500.0);
        assert_eq!(axis.min, 1.0);
        assert_eq!(axis.max, 10_000.0);
        let labels: Vec<&str> = axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["1", "10", "100", "1000", "10000"]);
    }

    #[test]
    fn log_fraction_skips_non_positive() {
        let axis = Axis::log(2.0, 100.0);
        assert_eq!(axis.fraction(10.0), Some(0.5));
        assert_eq!(axis.fraction(0.0), None);
        assert_eq!(axis.fraction(f64::NAN), None);
    }

    #[test_case(10.0, 500.0; "ten")]
    #[test_case(1.0, 30.0; "one")]
    #[test_case(100.0, 100.0; "single value")]
    fn smallest_exact_decade_still_has_height(low: f64, high: f64) {
        let p = panel(2, Scale::Log, &[low, high]);
        let axis = p.y_axis();
        assert!(axis.min < low, "floor {} not below {low}", axis.min);
        let frac = axis.fraction(low).unwrap();
        assert!(frac > 0.0, "value {low} sits on the floor");
        assert!(axis.fraction(high).unwrap() <= 1.0);
    }

    #[test]
    fn panel_axis_ignores_nan() {
        let p = panel(2, Scale::Log, &[f64::NAN, 20.0, 5.0]);
        let axis = p.y_axis();
        assert_eq!((axis.min, axis.max), (1.0, 100.0));
    }

    #[test]
    fn decade_labels() {
        assert_eq!(format_decade(-2), "0.01");
        assert_eq!(format_decade(3), "1000");
        assert_eq!(format_decade(7), "1e7");
    }
}
