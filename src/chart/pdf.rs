use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfLayerReference, Point, Pt, Rect, Rgb, TextMatrix,
};

use crate::color::to_pdf_color;

use super::layout::{Axis, BarPanel, Figure};

const MM_PER_PT: f32 = 0.352_778;
/// Average glyph advance of Times, as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;

const PAGE_MARGIN: f32 = 6.0;
// Plot-area insets inside a panel cell, in mm.
const INSET_LEFT: f32 = 20.0;
const INSET_RIGHT: f32 = 4.0;
const INSET_BOTTOM: f32 = 24.0;
const INSET_TOP: f32 = 11.0;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Render `figure` to a single-page PDF and write it to `path`.
pub fn write_pdf(figure: &Figure, path: &Path) -> Result<()> {
    let bytes = render_pdf(figure)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Render `figure` to PDF bytes. Panels share the page width equally.
pub fn render_pdf(figure: &Figure) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        figure.title.clone(),
        Mm(figure.width_mm),
        Mm(figure.height_mm),
        "chart",
    );
    let canvas = Canvas {
        layer: doc.get_page(page).get_layer(layer),
        regular: doc
            .add_builtin_font(BuiltinFont::TimesRoman)
            .context("loading Times-Roman")?,
        bold: doc
            .add_builtin_font(BuiltinFont::TimesBold)
            .context("loading Times-Bold")?,
        font_size: figure.font_size,
    };

    let n = figure.panels.len().max(1) as f32;
    let cell_w = (figure.width_mm - 2.0 * PAGE_MARGIN) / n;
    let cell_h = figure.height_mm - 2.0 * PAGE_MARGIN;
    for (i, panel) in figure.panels.iter().enumerate() {
        let cell = Region {
            x: PAGE_MARGIN + i as f32 * cell_w,
            y: PAGE_MARGIN,
            w: cell_w,
            h: cell_h,
        };
        draw_panel(&canvas, panel, cell);
    }

    doc.save_to_bytes().context("serializing PDF")
}

// ---------------------------------------------------------------------------
// Panel drawing
// ---------------------------------------------------------------------------

/// Rectangle on the page in mm, origin bottom-left.
#[derive(Debug, Clone, Copy)]
struct Region {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

fn draw_panel(canvas: &Canvas, panel: &BarPanel, cell: Region) {
    let plot = Region {
        x: cell.x + INSET_LEFT,
        y: cell.y + INSET_BOTTOM,
        w: cell.w - INSET_LEFT - INSET_RIGHT,
        h: cell.h - INSET_BOTTOM - INSET_TOP,
    };
    let axis = panel.y_axis();
    let (x_min, x_max) = panel.x_range();
    let x_pos = |x: f64| plot.x + ((x - x_min) / (x_max - x_min)) as f32 * plot.w;
    let y_pos = |frac: f64| plot.y + frac as f32 * plot.h;

    draw_grid(canvas, &axis, plot);

    // bars
    let bar_w = panel.bar_width();
    for (s_idx, series) in panel.series.iter().enumerate() {
        canvas.layer.set_fill_color(to_pdf_color(series.color));
        let offset = panel.bar_offset(s_idx);
        for (c_idx, &value) in series.values.iter().enumerate() {
            let Some(frac) = axis.fraction(value) else {
                continue;
            };
            if frac <= 0.0 {
                continue;
            }
            let center = c_idx as f64 + offset;
            canvas.layer.add_rect(
                Rect::new(
                    Mm(x_pos(center - bar_w / 2.0)),
                    Mm(plot.y),
                    Mm(x_pos(center + bar_w / 2.0)),
                    Mm(y_pos(frac)),
                )
                .with_mode(PaintMode::Fill),
            );
        }
    }

    // frame
    canvas.stroke_color(0.0);
    canvas.layer.set_outline_thickness(0.8);
    canvas.polyline(
        &[
            (plot.x, plot.y),
            (plot.x + plot.w, plot.y),
            (plot.x + plot.w, plot.y + plot.h),
            (plot.x, plot.y + plot.h),
        ],
        true,
    );

    // y ticks
    canvas.fill_color(0.0);
    let size = canvas.font_size * 0.85;
    for tick in &axis.ticks {
        let Some(frac) = axis.fraction(tick.value) else {
            continue;
        };
        let y = y_pos(frac);
        canvas.polyline(&[(plot.x - 1.2, y), (plot.x, y)], false);
        let w = canvas.text_width(&tick.label, size);
        canvas.text(&tick.label, size, plot.x - 1.8 - w, y - size * MM_PER_PT * 0.35);
    }

    // x ticks, rotated 45° and anchored at their right end
    let (sin, cos) = std::f32::consts::FRAC_PI_4.sin_cos();
    for (c_idx, label) in panel.categories.iter().enumerate() {
        let x = x_pos(c_idx as f64);
        canvas.polyline(&[(x, plot.y - 1.2), (x, plot.y)], false);
        let w = canvas.text_width(label, size);
        let (end_x, end_y) = (x, plot.y - 2.5);
        canvas.rotated_text(label, size, end_x - w * cos, end_y - w * sin, 45.0, false);
    }

    // axis labels and title
    let label_size = canvas.font_size;
    let w = canvas.text_width(&panel.x_label, label_size);
    canvas.text(&panel.x_label, label_size, plot.x + (plot.w - w) / 2.0, cell.y + 1.0);

    let w = canvas.text_width(&panel.y_label, label_size);
    canvas.rotated_text(
        &panel.y_label,
        label_size,
        cell.x + label_size * MM_PER_PT,
        plot.y + (plot.h - w) / 2.0,
        90.0,
        false,
    );

    let title_size = canvas.font_size * 1.1;
    let w = canvas.text_width(&panel.title, title_size);
    canvas.rotated_text(
        &panel.title,
        title_size,
        plot.x + (plot.w - w) / 2.0,
        plot.y + plot.h + 3.0,
        0.0,
        true,
    );

    draw_legend(canvas, panel, plot);
}

fn draw_grid(canvas: &Canvas, axis: &Axis, plot: Region) {
    canvas.stroke_color(0.75);
    canvas.layer.set_outline_thickness(0.5);
    canvas.layer.set_line_dash_pattern(LineDashPattern {
        dash_1: Some(3),
        gap_1: Some(2),
        ..Default::default()
    });
    for tick in &axis.ticks {
        let Some(frac) = axis.fraction(tick.value) else {
            continue;
        };
        let y = plot.y + frac as f32 * plot.h;
        canvas.polyline(&[(plot.x, y), (plot.x + plot.w, y)], false);
    }
    canvas.layer.set_line_dash_pattern(LineDashPattern::default());
}

/// Legend in the top-left corner of the plot area.
fn draw_legend(canvas: &Canvas, panel: &BarPanel, plot: Region) {
    let size = canvas.font_size * 0.85;
    let line_h = size * MM_PER_PT * 1.5;
    let swatch = size * MM_PER_PT * 0.9;
    let text_w = panel
        .series
        .iter()
        .map(|s| canvas.text_width(&s.name, size))
        .fold(0.0_f32, f32::max);
    let box_w = 2.0 + swatch + 1.5 + text_w + 2.0;
    let box_h = line_h * panel.series.len() as f32 + 1.5;
    let (bx, by) = (plot.x + 2.0, plot.y + plot.h - 2.0 - box_h);

    canvas.layer.set_fill_color(gray(1.0));
    canvas.stroke_color(0.8);
    canvas.layer.set_outline_thickness(0.5);
    canvas.layer.add_rect(
        Rect::new(Mm(bx), Mm(by), Mm(bx + box_w), Mm(by + box_h)).with_mode(PaintMode::FillStroke),
    );

    for (i, series) in panel.series.iter().enumerate() {
        let row_y = by + box_h - 1.0 - line_h * (i as f32 + 1.0) + (line_h - swatch) / 2.0;
        canvas.layer.set_fill_color(to_pdf_color(series.color));
        canvas.layer.add_rect(
            Rect::new(Mm(bx + 2.0), Mm(row_y), Mm(bx + 2.0 + swatch), Mm(row_y + swatch))
                .with_mode(PaintMode::Fill),
        );
        canvas.fill_color(0.0);
        canvas.text(&series.name, size, bx + 2.0 + swatch + 1.5, row_y + swatch * 0.1);
    }
}

// ---------------------------------------------------------------------------
// Drawing primitives over a printpdf layer
// ---------------------------------------------------------------------------

struct Canvas {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    font_size: f32,
}

impl Canvas {
    /// Estimated rendered width in mm; builtin fonts carry no metrics.
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * GLYPH_WIDTH * MM_PER_PT
    }

    fn text(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.regular);
    }

    fn rotated_text(&self, text: &str, size: f32, x: f32, y: f32, degrees: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.begin_text_section();
        self.layer.set_font(font, size);
        self.layer.set_text_matrix(TextMatrix::TranslateRotate(
            Pt::from(Mm(x)),
            Pt::from(Mm(y)),
            degrees,
        ));
        self.layer.write_text(text, font);
        self.layer.end_text_section();
    }

    fn polyline(&self, points: &[(f32, f32)], closed: bool) {
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
                .collect(),
            is_closed: closed,
        });
    }

    fn stroke_color(&self, level: f32) {
        self.layer.set_outline_color(gray(level));
    }

    fn fill_color(&self, level: f32) {
        self.layer.set_fill_color(gray(level));
    }
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::{Scale, Series};
    use crate::color::Rgb8;

    fn figure() -> Figure {
        let series = |name: &str, values: Vec<f64>| Series {
            name: name.into(),
            values,
            color: Rgb8::new(0x4c, 0x72, 0xb0),
        };
        Figure {
            title: "test".into(),
            panels: vec![
                BarPanel {
                    title: "Columns".into(),
                    x_label: "Instance ID".into(),
                    y_label: "Columns (log scale)".into(),
                    categories: vec!["1".into(), "2".into()],
                    series: vec![series("A", vec![10.0, 2000.0]), series("B", vec![f64::NAN, 0.0])],
                    scale: Scale::Log,
                },
                BarPanel {
                    title: "Time".into(),
                    x_label: "Instance ID".into(),
                    y_label: "Time (s)".into(),
                    categories: vec!["1".into(), "2".into()],
                    series: vec![series("A", vec![0.5, 3.0]), series("B", vec![1.0, 2.0])],
                    scale: Scale::Linear,
                },
            ],
            width_mm: 304.8,
            height_mm: 127.0,
            font_size: 11.0,
        }
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_pdf(&figure()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        write_pdf(&figure(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn empty_figure_still_renders() {
        let mut fig = figure();
        fig.panels.clear();
        assert!(render_pdf(&fig).unwrap().starts_with(b"%PDF"));
    }
}
