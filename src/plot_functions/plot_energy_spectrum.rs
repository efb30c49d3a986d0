// src/plot_functions/plot_energy_spectrum.rs

use ndarray_stats::QuantileExt;
use plotters::style::text_anchor::{HPos, VPos};
use std::error::Error;

use crate::constants::{
    COLOR_ENERGY_SPECTRUM, COLOR_PEAK_LABEL, COLOR_REFERENCE_SLOPE, ENERGY_AXIS_FLOOR,
    FONT_SIZE_ANNOTATION, LINE_WIDTH_PLOT, LOG_AXIS_HEADROOM_FACTOR, REFERENCE_SLOPE_DASH_COUNT,
    REFERENCE_SLOPE_EXPONENT, REFERENCE_SLOPE_LABEL_POS, REFERENCE_SLOPE_X_END,
    REFERENCE_SLOPE_X_START, REFERENCE_SLOPE_Y_ANCHOR, X_AXIS_LABEL, Y_AXIS_LABEL,
};
use crate::data_analysis::energy_spectrum::EnergySpectrum;
use crate::data_analysis::peak_locator::SpectralPeak;
use crate::plot_framework::{
    calculate_log_range, draw_log_log_plot, log_plottable_points, LineStyle, LogLogPlotConfig,
    PlotSeries, TextAnnotation,
};

/// Power-law guide line drawn over the spectrum for visual comparison
/// (the -5/3 inertial-range slope by default). Purely an annotation.
#[derive(Debug, Clone)]
pub struct ReferenceSlope {
    pub exponent: f64,
    pub x_start: f64,
    pub x_end: f64,
    /// Value of the line at `x_start`.
    pub y_anchor: f64,
    pub label: String,
    pub label_position: (f64, f64),
}

impl Default for ReferenceSlope {
    fn default() -> Self {
        Self {
            exponent: REFERENCE_SLOPE_EXPONENT,
            x_start: REFERENCE_SLOPE_X_START,
            x_end: REFERENCE_SLOPE_X_END,
            y_anchor: REFERENCE_SLOPE_Y_ANCHOR,
            label: "-5/3".to_string(),
            label_position: REFERENCE_SLOPE_LABEL_POS,
        }
    }
}

impl ReferenceSlope {
    pub fn value_at(&self, x: f64) -> f64 {
        self.y_anchor * (x / self.x_start).powf(self.exponent)
    }

    pub fn endpoints(&self) -> [(f64, f64); 2] {
        [
            (self.x_start, self.value_at(self.x_start)),
            (self.x_end, self.value_at(self.x_end)),
        ]
    }
}

/// Peak annotation text: the period rounded to whole time units, e.g. `10T`.
pub fn format_period_label(period: f64) -> String {
    format!("{period:.0}T")
}

/// Assembles the chart description for an energy spectrum. Returns `None` when no
/// bin has both a positive frequency and a positive energy.
pub fn build_spectrum_plot_config(
    spectrum: &EnergySpectrum,
    peak: Option<&SpectralPeak>,
    reference: &ReferenceSlope,
) -> Option<LogLogPlotConfig> {
    let spectrum_points = log_plottable_points(&spectrum.points(), ENERGY_AXIS_FLOOR);
    if spectrum_points.is_empty() {
        return None;
    }
    let reference_points = log_plottable_points(&reference.endpoints(), ENERGY_AXIS_FLOOR);

    let (x_min, x_max) = spectrum_points
        .iter()
        .chain(reference_points.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
            (lo.min(x), hi.max(x))
        });
    let energy_max = *spectrum.energy.max_skipnan();
    let y_max = reference_points
        .iter()
        .map(|&(_, y)| y)
        .fold(energy_max, f64::max);

    let x_range = calculate_log_range(x_min, x_max, 1.0)?;
    let y_range = ENERGY_AXIS_FLOOR..y_max.max(ENERGY_AXIS_FLOOR) * LOG_AXIS_HEADROOM_FACTOR;

    let mut series = vec![PlotSeries {
        data: spectrum_points,
        label: "Energy Spectrum".to_string(),
        color: *COLOR_ENERGY_SPECTRUM,
        stroke_width: LINE_WIDTH_PLOT,
        line_style: LineStyle::Solid,
    }];
    if reference_points.len() == 2 {
        series.push(PlotSeries {
            data: reference_points,
            label: format!("Slope {}", reference.label),
            color: *COLOR_REFERENCE_SLOPE,
            stroke_width: LINE_WIDTH_PLOT,
            line_style: LineStyle::Dashed {
                dashes: REFERENCE_SLOPE_DASH_COUNT,
            },
        });
    }

    let mut annotations = vec![TextAnnotation {
        position: reference.label_position,
        text: reference.label.clone(),
        color: *COLOR_REFERENCE_SLOPE,
        font_size: FONT_SIZE_ANNOTATION,
        h_align: HPos::Left,
        v_align: VPos::Bottom,
    }];
    if let Some(peak) = peak {
        annotations.push(TextAnnotation {
            position: (peak.frequency, peak.energy.max(ENERGY_AXIS_FLOOR)),
            text: format_period_label(peak.period),
            color: *COLOR_PEAK_LABEL,
            font_size: FONT_SIZE_ANNOTATION,
            h_align: HPos::Center,
            v_align: VPos::Bottom,
        });
    }

    Some(LogLogPlotConfig {
        x_range,
        y_range,
        series,
        annotations,
        x_label: X_AXIS_LABEL.to_string(),
        y_label: Y_AXIS_LABEL.to_string(),
    })
}

/// Renders the energy spectrum on log-log axes with the reference slope and the
/// peak period label, and saves it as a PNG.
pub fn plot_energy_spectrum(
    spectrum: &EnergySpectrum,
    peak: Option<&SpectralPeak>,
    reference: &ReferenceSlope,
    output_file: &str,
) -> Result<(), Box<dyn Error>> {
    let plot_type_name = "Energy Spectrum";
    match build_spectrum_plot_config(spectrum, peak, reference) {
        Some(plot_config) => draw_log_log_plot(output_file, &plot_config),
        None => {
            println!("\nINFO: Skipping {plot_type_name} plot: no positive spectral values to draw on log axes.");
            Ok(())
        }
    }
}
