//! Length-distribution chart renderer
//!
//! The chart is composed as an SVG document (line-and-marker plot, accession
//! labels rotated along the x axis) and rasterized to PNG with resvg.
//! Records are ordered by descending length for the rendering only; the
//! canonical table order is never mutated.

use crate::record::SequenceRow;
use crate::{Result, TaxaError};
use resvg::{tiny_skia, usvg};
use std::path::Path;
use svg::node::element::{Circle, Line, Polyline, Rectangle, Text};
use svg::Document;

const W: f32 = 1200.0;
const H: f32 = 700.0;
const MARGIN_LEFT: f32 = 90.0;
const MARGIN_RIGHT: f32 = 40.0;
const MARGIN_TOP: f32 = 60.0;
const MARGIN_BOTTOM: f32 = 150.0;
const Y_TICKS: u32 = 5;

const AXIS_COLOR: &str = "#000000";
const GRID_COLOR: &str = "#d0d0d0";
const SERIES_COLOR: &str = "#1f4fcc";

/// Composes the chart as an SVG document string
///
/// Works on a sorted copy of the rows; rows with no length plot at zero.
/// An empty row set still yields a valid axes-only chart.
pub fn compose_chart_svg(rows: &[SequenceRow]) -> String {
    let mut sorted: Vec<&SequenceRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.length.unwrap_or(0).cmp(&a.length.unwrap_or(0)));

    let plot_w = W - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = H - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = H - MARGIN_BOTTOM;

    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, W, H))
        .set("width", W)
        .set("height", H)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", W)
                .set("height", H)
                .set("fill", "#ffffff"),
        );

    // Title and axis captions
    doc = doc.add(
        Text::new("Sequence Length Distribution")
            .set("x", W / 2.0)
            .set("y", MARGIN_TOP / 2.0)
            .set("text-anchor", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", 22)
            .set("fill", "#111111"),
    );
    doc = doc.add(
        Text::new("Accession Number")
            .set("x", MARGIN_LEFT + plot_w / 2.0)
            .set("y", H - 12.0)
            .set("text-anchor", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", 14)
            .set("fill", "#111111"),
    );
    doc = doc.add(
        Text::new("Sequence Length")
            .set("x", 22.0)
            .set("y", MARGIN_TOP + plot_h / 2.0)
            .set("text-anchor", "middle")
            .set(
                "transform",
                format!("rotate(-90 22 {})", MARGIN_TOP + plot_h / 2.0),
            )
            .set("font-family", "sans-serif")
            .set("font-size", 14)
            .set("fill", "#111111"),
    );

    // Y scale: top gridline sits at the longest sequence
    let max_len = sorted
        .iter()
        .filter_map(|row| row.length)
        .max()
        .unwrap_or(0)
        .max(1) as f32;

    for tick in 0..=Y_TICKS {
        let value = max_len * tick as f32 / Y_TICKS as f32;
        let y = baseline - (value / max_len) * plot_h;
        doc = doc.add(
            Line::new()
                .set("x1", MARGIN_LEFT)
                .set("y1", y)
                .set("x2", MARGIN_LEFT + plot_w)
                .set("y2", y)
                .set("stroke", GRID_COLOR)
                .set("stroke-width", 1),
        );
        doc = doc.add(
            Text::new(format!("{}", value.round() as u64))
                .set("x", MARGIN_LEFT - 8.0)
                .set("y", y + 4.0)
                .set("text-anchor", "end")
                .set("font-family", "monospace")
                .set("font-size", 11)
                .set("fill", "#333333"),
        );
    }

    // Axes
    doc = doc.add(
        Line::new()
            .set("x1", MARGIN_LEFT)
            .set("y1", baseline)
            .set("x2", MARGIN_LEFT + plot_w)
            .set("y2", baseline)
            .set("stroke", AXIS_COLOR)
            .set("stroke-width", 2),
    );
    doc = doc.add(
        Line::new()
            .set("x1", MARGIN_LEFT)
            .set("y1", MARGIN_TOP)
            .set("x2", MARGIN_LEFT)
            .set("y2", baseline)
            .set("stroke", AXIS_COLOR)
            .set("stroke-width", 2),
    );

    // Series: one marker per record, connected in length-descending order
    let step = plot_w / sorted.len().max(1) as f32;
    let mut points: Vec<(f32, f32)> = Vec::with_capacity(sorted.len());

    for (i, row) in sorted.iter().enumerate() {
        let x = MARGIN_LEFT + step * (i as f32 + 0.5);
        let len = row.length.unwrap_or(0) as f32;
        let y = baseline - (len / max_len) * plot_h;
        points.push((x, y));

        doc = doc.add(
            Circle::new()
                .set("cx", x)
                .set("cy", y)
                .set("r", 3.5)
                .set("fill", SERIES_COLOR),
        );
        doc = doc.add(
            Text::new(row.accession.clone())
                .set("x", x)
                .set("y", baseline + 12.0)
                .set("text-anchor", "start")
                .set("transform", format!("rotate(90 {} {})", x, baseline + 12.0))
                .set("font-family", "monospace")
                .set("font-size", 10)
                .set("fill", "#333333"),
        );
    }

    if points.len() >= 2 {
        let point_list = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        doc = doc.add(
            Polyline::new()
                .set("points", point_list)
                .set("fill", "none")
                .set("stroke", SERIES_COLOR)
                .set("stroke-width", 1.5),
        );
    }

    doc.to_string()
}

/// Renders the length-distribution chart to a PNG file
pub fn render_length_chart(rows: &[SequenceRow], path: &Path) -> Result<()> {
    let svg_text = compose_chart_svg(rows);

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg_text, &options)
        .map_err(|e| TaxaError::Chart(format!("invalid chart SVG: {e}")))?;

    let mut pixmap = tiny_skia::Pixmap::new(W as u32, H as u32)
        .ok_or_else(|| TaxaError::Chart("could not allocate pixel buffer".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap
        .save_png(path)
        .map_err(|e| TaxaError::Chart(format!("failed to write {}: {e}", path.display())))?;

    Ok(())
}
