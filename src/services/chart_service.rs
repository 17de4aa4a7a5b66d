//! Rate history chart rendering
//!
//! The scene builder is a pure transform: the same series always produces
//! the same geometry. Scales are recomputed on every call from the series
//! alone; nothing is cached between renders.

use chrono::{LocalResult, TimeZone, Utc};
use plotters::prelude::*;

use crate::models::sample::{sort_series, Sample};
use crate::utils::format::format_amount;

/// Fixed logical drawing surface for the SVG chart
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 640.0,
            height: 260.0,
            padding: 36.0,
        }
    }
}

/// Linear mapping from a data domain onto a screen range.
///
/// A collapsed domain (single sample, or all values equal) is widened to a
/// unit span so the mapping never divides by zero; every input then lands
/// on the start of the range.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    span: f64,
    range_start: f64,
    range_len: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_start: f64, range_end: f64) -> Self {
        let mut span = domain_max - domain_min;
        if span == 0.0 {
            span = 1.0;
        }
        LinearScale {
            domain_min,
            span,
            range_start,
            range_len: range_end - range_start,
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        self.range_start + (value - self.domain_min) / self.span * self.range_len
    }
}

/// A straight line between two screen points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A gridline together with its tick label
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub line: Line,
    pub label: String,
}

/// Screen-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Renderable chart scene: two axis lines, three gridlines per axis with
/// tick labels, and the scaled sample points. The path connects the points
/// in order; each point also gets a marker.
#[derive(Debug, Clone)]
pub struct ChartScene {
    pub viewport: Viewport,
    pub axes: [Line; 2],
    pub x_grid: Vec<GridLine>,
    pub y_grid: Vec<GridLine>,
    pub path: Vec<Point>,
}

/// Build the chart scene for a series of rate samples.
///
/// The input order is unspecified; samples are sorted ascending by
/// timestamp before the path is constructed. An empty series produces a
/// scene with axes only.
pub fn build_scene(samples: &[Sample], viewport: Viewport) -> ChartScene {
    let mut series = samples.to_vec();
    sort_series(&mut series);

    let Viewport { width, height, padding } = viewport;
    let axes = [
        Line { x1: padding, y1: padding, x2: padding, y2: height - padding },
        Line { x1: padding, y1: height - padding, x2: width - padding, y2: height - padding },
    ];

    if series.is_empty() {
        return ChartScene {
            viewport,
            axes,
            x_grid: Vec::new(),
            y_grid: Vec::new(),
            path: Vec::new(),
        };
    }

    let t_min = series[0].timestamp.timestamp_millis();
    let t_max = series[series.len() - 1].timestamp.timestamp_millis();
    let (v_min, v_max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.rate), hi.max(s.rate))
        });

    let x_scale = LinearScale::new(t_min as f64, t_max as f64, padding, width - padding);
    // Inverted range: larger rates plot higher on screen
    let y_scale = LinearScale::new(v_min, v_max, height - padding, padding);

    let path: Vec<Point> = series
        .iter()
        .map(|s| Point {
            x: x_scale.map(s.timestamp.timestamp_millis() as f64),
            y: y_scale.map(s.rate),
        })
        .collect();

    let t_mid = t_min + (t_max - t_min) / 2;
    let x_grid = [t_min, t_mid, t_max]
        .iter()
        .map(|&millis| {
            let x = x_scale.map(millis as f64);
            GridLine {
                line: Line { x1: x, y1: padding, x2: x, y2: height - padding },
                label: format_tick_time(millis),
            }
        })
        .collect();

    let v_mid = (v_min + v_max) / 2.0;
    let y_grid = [v_min, v_mid, v_max]
        .iter()
        .map(|&value| {
            let y = y_scale.map(value);
            GridLine {
                line: Line { x1: padding, y1: y, x2: width - padding, y2: y },
                label: format_amount(Some(value)),
            }
        })
        .collect();

    ChartScene { viewport, axes, x_grid, y_grid, path }
}

fn format_tick_time(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis) {
        LocalResult::Single(timestamp) => timestamp.format("%Y-%m-%d %H:%M").to_string(),
        _ => String::new(),
    }
}

/// Serialize a scene to a standalone SVG document
pub fn scene_to_svg(scene: &ChartScene) -> String {
    let Viewport { width, height, padding } = scene.viewport;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" width=\"{}\" height=\"{}\">\n",
        width, height, width, height
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
        width, height
    ));

    for grid in &scene.x_grid {
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#ddd\"/>\n",
            grid.line.x1, grid.line.y1, grid.line.x2, grid.line.y2
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\">{}</text>\n",
            grid.line.x1,
            height - padding + 14.0,
            grid.label
        ));
    }

    for grid in &scene.y_grid {
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#ddd\"/>\n",
            grid.line.x1, grid.line.y1, grid.line.x2, grid.line.y2
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"end\">{}</text>\n",
            grid.line.x1 - 6.0,
            grid.line.y1 + 4.0,
            grid.label
        ));
    }

    for axis in &scene.axes {
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\n",
            axis.x1, axis.y1, axis.x2, axis.y2
        ));
    }

    if !scene.path.is_empty() {
        let mut d = String::new();
        for (i, point) in scene.path.iter().enumerate() {
            let op = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{}{:.1} {:.1} ", op, point.x, point.y));
        }
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"#1d6fd1\" stroke-width=\"1.5\"/>\n",
            d.trim_end()
        ));
        for point in &scene.path {
            svg.push_str(&format!(
                "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"#1d6fd1\"/>\n",
                point.x, point.y
            ));
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render the series to a PNG file using plotters.
///
/// Needs at least two samples; a single point has no drawable line range.
pub fn write_png_chart(
    samples: &[Sample],
    base: &str,
    target: &str,
    path: &str,
    width: u32,
    height: u32,
) -> Result<(), String> {
    if samples.len() < 2 {
        return Err(
            "❌ Not enough rate data to generate a chart (minimum 2 points required).".to_string(),
        );
    }

    let mut series = samples.to_vec();
    sort_series(&mut series);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| format!("Failed to fill canvas: {}", e))?;

    let min_rate = series.iter().map(|s| s.rate).fold(f64::INFINITY, f64::min);
    let max_rate = series
        .iter()
        .map(|s| s.rate)
        .fold(f64::NEG_INFINITY, f64::max);

    // Pad the value range so the line does not hug the frame
    let rate_range = (max_rate - min_rate).max(1e-8);
    let pad = rate_range * 0.1;
    let y_min = (min_rate - pad).max(0.0);
    let y_max = max_rate + pad;

    let x_min = series[0].timestamp;
    let x_max = series[series.len() - 1].timestamp;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{}/{} Rate History", base, target),
            ("sans-serif", 32.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| format!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .y_desc(format!("{} per 1 {}", target, base))
        .x_desc("Time")
        .draw()
        .map_err(|e| format!("Failed to draw mesh: {}", e))?;

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|s| (s.timestamp, s.rate)),
            &BLUE,
        ))
        .map_err(|e| format!("Failed to draw line: {}", e))?;

    chart
        .draw_series(
            series
                .iter()
                .map(|s| Circle::new((s.timestamp, s.rate), 3, BLUE.filled())),
        )
        .map_err(|e| format!("Failed to draw points: {}", e))?;

    root.present()
        .map_err(|e| format!("Failed to render chart: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: &str, rate: f64) -> Sample {
        Sample {
            timestamp: timestamp.parse().unwrap(),
            rate,
        }
    }

    #[test]
    fn test_screen_x_is_nondecreasing_for_sorted_series() {
        let series = vec![
            sample("2024-01-01T00:00:00Z", 30.0),
            sample("2024-01-02T06:00:00Z", 31.5),
            sample("2024-01-02T18:00:00Z", 29.0),
            sample("2024-01-05T00:00:00Z", 33.0),
        ];

        let scene = build_scene(&series, Viewport::default());
        for pair in scene.path.windows(2) {
            assert!(pair[0].x <= pair[1].x);
        }
    }

    #[test]
    fn test_single_sample_has_no_segments_and_finite_coordinates() {
        let series = vec![sample("2024-01-01T00:00:00Z", 30.0)];
        let viewport = Viewport::default();

        let scene = build_scene(&series, viewport);
        assert_eq!(scene.path.len(), 1);
        assert!(scene.path[0].x.is_finite());
        assert!(scene.path[0].y.is_finite());
        // Collapsed domains pin the point to the start of each range
        assert_eq!(scene.path[0].x, viewport.padding);
        assert_eq!(scene.path[0].y, viewport.height - viewport.padding);
    }

    #[test]
    fn test_equal_rates_give_identical_y_ticks_and_constant_y() {
        let series = vec![
            sample("2024-01-01T00:00:00Z", 5.0),
            sample("2024-01-02T00:00:00Z", 5.0),
            sample("2024-01-03T00:00:00Z", 5.0),
        ];

        let scene = build_scene(&series, Viewport::default());
        let labels: Vec<&str> = scene.y_grid.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["5.00", "5.00", "5.00"]);

        let first_y = scene.path[0].y;
        assert!(scene.path.iter().all(|p| p.y == first_y));
    }

    #[test]
    fn test_out_of_order_series_is_sorted_before_projection() {
        let series = vec![
            sample("2024-01-01T00:00:00Z", 30.0),
            sample("2024-01-03T00:00:00Z", 32.0),
            sample("2024-01-02T00:00:00Z", 31.0),
        ];
        let viewport = Viewport::default();

        let scene = build_scene(&series, viewport);
        assert_eq!(scene.path.len(), 3);
        // Middle timestamp lands strictly between the endpoints
        assert!(scene.path[0].x < scene.path[1].x);
        assert!(scene.path[1].x < scene.path[2].x);
        // Rates are ascending after the sort, so y strictly decreases
        assert!(scene.path[0].y > scene.path[1].y);
        assert!(scene.path[1].y > scene.path[2].y);
        assert_eq!(scene.path[0].x, viewport.padding);
        assert_eq!(scene.path[2].x, viewport.width - viewport.padding);
    }

    #[test]
    fn test_empty_series_renders_axes_only() {
        let scene = build_scene(&[], Viewport::default());
        assert!(scene.path.is_empty());
        assert!(scene.x_grid.is_empty());
        assert!(scene.y_grid.is_empty());
        assert_eq!(scene.axes.len(), 2);
    }

    #[test]
    fn test_degenerate_scale_maps_to_range_start() {
        let scale = LinearScale::new(5.0, 5.0, 0.0, 10.0);
        assert_eq!(scale.map(5.0), 0.0);
    }

    #[test]
    fn test_scale_inversion_puts_larger_values_higher() {
        // Screen y grows downward, so the larger rate maps to the smaller y
        let scale = LinearScale::new(0.0, 10.0, 100.0, 20.0);
        assert_eq!(scale.map(0.0), 100.0);
        assert_eq!(scale.map(10.0), 20.0);
    }

    #[test]
    fn test_svg_document_contains_scene_elements() {
        let series = vec![
            sample("2024-01-01T00:00:00Z", 30.0),
            sample("2024-01-03T00:00:00Z", 32.0),
        ];

        let svg = scene_to_svg(&build_scene(&series, Viewport::default()));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<path d=\"M"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("30.00"));
        assert!(svg.contains("32.00"));
        assert!(svg.contains("2024-01-01"));
        assert!(svg.ends_with("</svg>\n"));
    }
}
