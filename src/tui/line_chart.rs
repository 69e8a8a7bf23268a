//! Plotters-powered multi-series line chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + tick rendering
//! - less manual work for labels
//! - easy to extend later (PNG/SVG export backends, annotations)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.
//!
//! The widget is data-driven and render-only: series, bounds, and gap
//! segmentation are computed by the caller. Null points never reach this
//! widget; they have already split a series into separate polyline
//! segments, which is how a chart gap is drawn.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One drawable series: a label, an RGB color, and gap-split segments of
/// `(x position, y value)` points.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: String,
    pub color: (u8, u8, u8),
    pub segments: Vec<Vec<(f64, f64)>>,
}

/// Split a position-aligned optional series into polyline segments.
///
/// Consecutive present values join into one segment; each `None` ends the
/// current segment, leaving a visible gap between the neighbors.
pub fn segments_from(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (i, v) in values.iter().enumerate() {
        match v {
            Some(y) if y.is_finite() => current.push((i as f64, *y)),
            _ => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// A categorical-x line chart (x positions map to year labels).
pub struct DashLineChart<'a> {
    pub series: &'a [ChartSeries],
    /// Year labels, one per x position.
    pub x_labels: &'a [String],
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
}

impl Widget for DashLineChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. Render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.x_labels.len();
        let x0 = 0.0;
        let x1 = (n.saturating_sub(1)).max(1) as f64;
        let [y0, y1] = self.y_bounds;

        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        let x_labels = self.x_labels;
        let series: Vec<ChartSeries> = self.series.to_vec();
        let y_label = self.y_label.to_string();

        let fmt_x = move |v: f64| -> String {
            let i = v.round() as usize;
            x_labels.get(i).cloned().unwrap_or_default()
        };

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Mesh lines off: axes + labels are enough at terminal resolution.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(&y_label)
                .x_labels(n.min(7))
                .y_labels(5)
                .x_label_formatter(&|v| fmt_x(*v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for s in &series {
                let color = RGBColor(s.color.0, s.color.1, s.color.2);
                for segment in &s.segments {
                    // A single orphaned point still deserves a mark.
                    if segment.len() == 1 {
                        chart.draw_series(
                            segment.iter().map(|&(x, y)| Pixel::new((x, y), color)),
                        )?;
                    } else {
                        chart.draw_series(LineSeries::new(segment.iter().copied(), &color))?;
                    }
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
