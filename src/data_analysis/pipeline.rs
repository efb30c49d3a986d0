// src/data_analysis/pipeline.rs

use ndarray::Array1;

use crate::constants::PARSEVAL_RELATIVE_TOLERANCE;
use crate::data_analysis::energy_spectrum::{estimate_energy_spectrum, EnergySpectrum};
use crate::data_analysis::peak_locator::{locate_peak, SpectralPeak};
use crate::data_analysis::preprocess::{preprocess, PaddedSignal, PreprocessConfig};
use crate::data_analysis::variance_check::{check_variance, VarianceReport};
use crate::data_input::series_data::TimeSeries;
use crate::error::SpectrumError;

/// Settings for one spectrum analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    pub preprocess: PreprocessConfig,
    /// Largest accepted relative gap between the two variance estimates before a warning.
    pub variance_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            variance_tolerance: PARSEVAL_RELATIVE_TOLERANCE,
        }
    }
}

/// Everything the pipeline produces for one input record.
#[derive(Debug, Clone)]
pub struct SpectrumAnalysis {
    pub signal: PaddedSignal,
    pub spectrum: EnergySpectrum,
    pub variance: VarianceReport,
    pub peak: SpectralPeak,
}

impl SpectrumAnalysis {
    /// True when the spectrum integrates back to the signal variance within `tolerance`.
    pub fn variance_consistent(&self, tolerance: f64) -> bool {
        self.variance.is_consistent(tolerance)
    }

    /// A variance mismatch not explained by the odd-`N` last bin.
    pub fn scaling_suspect(&self, tolerance: f64) -> bool {
        !self.variance_consistent(tolerance) && !self.spectrum.last_bin_unpaired()
    }
}

/// Runs preprocessing, spectral estimation, the variance check and the peak search
/// on a sampled record. The sample interval comes from the first two time stamps.
pub fn analyze_series(
    series: &TimeSeries,
    config: &AnalysisConfig,
) -> Result<SpectrumAnalysis, SpectrumError> {
    let dt = series.sample_interval()?;
    analyze_values(&series.values, dt, config)
}

/// Same as [`analyze_series`] for bare samples taken every `dt`.
pub fn analyze_values(
    values: &Array1<f64>,
    dt: f64,
    config: &AnalysisConfig,
) -> Result<SpectrumAnalysis, SpectrumError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SpectrumError::InvalidSampleInterval { dt });
    }

    let signal = preprocess(values, &config.preprocess)?;
    tracing::debug!(
        original_len = signal.original_len,
        padded_len = signal.len(),
        "preprocessed signal"
    );

    let spectrum = estimate_energy_spectrum(&signal.samples, dt)?;
    let variance = check_variance(&signal.samples, &spectrum);
    if !variance.is_consistent(config.variance_tolerance) {
        if spectrum.last_bin_unpaired() {
            tracing::debug!(
                n_fft = spectrum.n_fft,
                relative_error = variance.relative_error(),
                "variance shortfall from the single-counted last bin of an odd-length transform"
            );
        } else {
            tracing::warn!(
                "Variance mismatch: time domain {:.6e}, spectrum {:.6e} (relative error {:.2e})",
                variance.variance_time,
                variance.variance_freq,
                variance.relative_error()
            );
        }
    }

    let peak = locate_peak(&spectrum)?;
    tracing::debug!(
        index = peak.index,
        frequency = peak.frequency,
        period = peak.period,
        "located spectral peak"
    );

    Ok(SpectrumAnalysis {
        signal,
        spectrum,
        variance,
        peak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::preprocess::NonFinitePolicy;
    use ndarray::s;
    use std::f64::consts::PI;

    #[test]
    fn test_pipeline_on_two_tone_signal() {
        let dt = 0.05;
        let values = Array1::from_iter((0..600).map(|i| {
            let t = i as f64 * dt;
            1.5 * (2.0 * PI * 2.0 * t).sin() + 0.2 * (2.0 * PI * 7.0 * t).sin() + 0.4 * t
        }));
        let analysis = analyze_values(&values, dt, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.signal.len(), 1000);
        assert_eq!(analysis.spectrum.len(), 501);
        assert_eq!(analysis.spectrum.dt, dt);
        assert!(analysis.variance_consistent(1e-6));
        assert!((analysis.peak.frequency - 2.0).abs() <= analysis.spectrum.frequency_resolution());
    }

    #[test]
    fn test_invalid_dt_rejected() {
        let values = Array1::from_elem(10, 1.0);
        assert!(matches!(
            analyze_values(&values, -0.1, &AnalysisConfig::default()),
            Err(SpectrumError::InvalidSampleInterval { .. })
        ));
    }

    fn sine_with_gap(len: usize, dt: f64, period: f64, gap: usize) -> Array1<f64> {
        let mut values =
            Array1::from_iter((0..len).map(|i| (2.0 * PI * i as f64 * dt / period).sin()));
        values[gap] = f64::NAN;
        values
    }

    fn config_with_policy(non_finite: NonFinitePolicy) -> AnalysisConfig {
        AnalysisConfig {
            preprocess: PreprocessConfig {
                non_finite,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_skip_policy_recovers_spectrum_around_nan() {
        let values = sine_with_gap(1000, 0.1, 10.0, 500);
        let analysis =
            analyze_values(&values, 0.1, &config_with_policy(NonFinitePolicy::Skip)).unwrap();
        assert!(analysis.spectrum.energy.iter().all(|e| e.is_finite()));
        assert!(analysis.variance_consistent(1e-6));
        assert!((analysis.peak.period - 10.0).abs() < 0.5);
    }

    #[test]
    fn test_propagate_policy_with_nan_reports_non_finite_spectrum() {
        let values = sine_with_gap(1000, 0.1, 10.0, 500);
        assert!(matches!(
            analyze_values(&values, 0.1, &config_with_policy(NonFinitePolicy::Propagate)),
            Err(SpectrumError::NonFiniteSpectrum { bins: 701 })
        ));
    }

    #[test]
    fn test_odd_length_shortfall_is_not_suspect() {
        let dt = 0.1;
        let values = Array1::from_iter((0..1001).map(|i| (2.0 * PI * i as f64 * dt / 10.0).sin()));
        let analysis = analyze_values(&values, dt, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.spectrum.n_fft, 1401);
        assert!(analysis.spectrum.last_bin_unpaired());
        assert!(!analysis.scaling_suspect(1e-6));

        let even_values = values.slice(s![..1000]).to_owned();
        let even = analyze_values(&even_values, dt, &AnalysisConfig::default()).unwrap();
        assert!(!even.spectrum.last_bin_unpaired());
        assert!(!even.scaling_suspect(1e-6));
    }
}
