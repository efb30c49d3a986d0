// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::combinators::IntoLogRange;
use plotters::drawing::IntoDrawingArea;
use plotters::element::{PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{LINE_WIDTH_LEGEND, PLOT_HEIGHT, PLOT_WIDTH};
use crate::font_config::{
    FONT_FAMILY_SYSTEM, FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_LEGEND, FONT_TUPLE_TICK_LABEL,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    /// Each segment between consecutive points is split into `dashes` visible pieces.
    Dashed { dashes: usize },
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub line_style: LineStyle,
}

/// Text placed at a data coordinate.
#[derive(Clone)]
pub struct TextAnnotation {
    pub position: (f64, f64),
    pub text: String,
    pub color: RGBColor,
    pub font_size: i32,
    pub h_align: HPos,
    pub v_align: VPos,
}

#[derive(Clone)]
pub struct LogLogPlotConfig {
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub annotations: Vec<TextAnnotation>,
    pub x_label: String,
    pub y_label: String,
}

/// Keeps the points a log-log chart can show (positive x, positive finite y).
/// Values below `y_floor` are raised to it so the curve runs along the bottom axis.
pub fn log_plottable_points(data: &[(f64, f64)], y_floor: f64) -> Vec<(f64, f64)> {
    data.iter()
        .filter(|(x, y)| x.is_finite() && *x > 0.0 && y.is_finite() && *y > 0.0)
        .map(|&(x, y)| (x, y.max(y_floor)))
        .collect()
}

/// Log-axis range covering `[min_val, max_val]`, widened by `headroom` (a factor) on both ends.
/// Returns `None` unless both bounds are positive and finite.
pub fn calculate_log_range(min_val: f64, max_val: f64, headroom: f64) -> Option<Range<f64>> {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    if !(min.is_finite() && max.is_finite()) || min <= 0.0 {
        return None;
    }
    let headroom = headroom.max(1.0);
    let (lo, hi) = (min / headroom, max * headroom);
    if hi > lo {
        Some(lo..hi)
    } else {
        // Degenerate single-value range: open it up one decade each way.
        Some(lo / 10.0..hi * 10.0)
    }
}

/// Splits a straight log-log segment into `dashes` visible pieces with equal gaps.
/// Both points must be positive.
pub fn dash_segments(start: (f64, f64), end: (f64, f64), dashes: usize) -> Vec<[(f64, f64); 2]> {
    if dashes == 0 {
        return vec![[start, end]];
    }
    let steps = (2 * dashes - 1) as f64;
    let at = |t: f64| {
        (
            start.0 * (end.0 / start.0).powf(t),
            start.1 * (end.1 / start.1).powf(t),
        )
    };
    (0..dashes)
        .map(|k| [at(2.0 * k as f64 / steps), at((2 * k + 1) as f64 / steps)])
        .collect()
}

/// Tick label for a log axis: plain decimals in the middle decades, exponent form otherwise.
pub fn format_log_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e4).contains(&magnitude) {
        format!("{value:.0e}")
    } else {
        let text = format!("{value:.3}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Draws a single log-log chart with optional dashed series and text annotations, and saves it.
pub fn draw_log_log_plot(
    output_filename: &str,
    plot_config: &LogLogPlotConfig,
) -> Result<(), Box<dyn Error>> {
    let root_area =
        BitMapBackend::new(output_filename, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(140)
        .build_cartesian_2d(
            plot_config.x_range.clone().log_scale(),
            plot_config.y_range.clone().log_scale(),
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_label_formatter(&|x| format_log_tick(*x))
        .y_label_formatter(&|y| format_log_tick(*y))
        .label_style(FONT_TUPLE_TICK_LABEL)
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let mut legend_series_count = 0;

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let style = s.color.stroke_width(s.stroke_width);
        let drawn = match s.line_style {
            LineStyle::Solid => chart.draw_series(LineSeries::new(s.data.iter().cloned(), style))?,
            LineStyle::Dashed { dashes } => chart.draw_series(
                s.data
                    .windows(2)
                    .flat_map(|pair| dash_segments(pair[0], pair[1], dashes))
                    .map(|segment| PathElement::new(segment.to_vec(), style)),
            )?,
        };

        if !s.label.is_empty() {
            let legend_color = s.color;
            drawn.label(s.label.as_str()).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    legend_color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    for annotation in &plot_config.annotations {
        let (x, y) = annotation.position;
        if !(x > 0.0 && y > 0.0) {
            continue;
        }
        let text_style = (FONT_FAMILY_SYSTEM, annotation.font_size)
            .into_font()
            .color(&annotation.color)
            .pos(Pos::new(annotation.h_align, annotation.v_align));
        chart.draw_series(std::iter::once(Text::new(
            annotation.text.clone(),
            (x, y),
            text_style,
        )))?;
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    root_area.present()?;
    println!("  Plot saved as '{output_filename}'.");
    Ok(())
}
