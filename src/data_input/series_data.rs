// src/data_input/series_data.rs

use ndarray::Array1;

use crate::constants::SAMPLING_IRREGULARITY_TOLERANCE;
use crate::error::SpectrumError;

/// A uniformly sampled scalar record: `values[i]` was taken at `time[i]`.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    pub time: Array1<f64>,  // Timestamps, increasing with a constant step.
    pub values: Array1<f64>, // Signal samples (e.g. velocity).
}

/// Summary of how far the time stamps stray from a constant step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingCheck {
    pub dt: f64,
    pub max_relative_deviation: f64,
    pub non_increasing_steps: usize,
}

impl SamplingCheck {
    pub fn is_uniform(&self) -> bool {
        self.non_increasing_steps == 0
            && self.max_relative_deviation <= SAMPLING_IRREGULARITY_TOLERANCE
    }
}

impl TimeSeries {
    pub fn new(time: Array1<f64>, values: Array1<f64>) -> Result<Self, SpectrumError> {
        if time.len() != values.len() {
            return Err(SpectrumError::malformed(
                None,
                format!(
                    "time and value columns differ in length ({} vs {})",
                    time.len(),
                    values.len()
                ),
            ));
        }
        Ok(Self { time, values })
    }

    /// Builds a series with timestamps `t0, t0 + dt, ...` for the given samples.
    pub fn from_uniform(values: Array1<f64>, dt: f64, t0: f64) -> Self {
        let time = Array1::from_iter((0..values.len()).map(|i| t0 + i as f64 * dt));
        Self { time, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample interval taken from the first two timestamps.
    pub fn sample_interval(&self) -> Result<f64, SpectrumError> {
        if self.time.len() < 2 {
            return Err(SpectrumError::InsufficientData {
                context: "sample interval",
                needed: 2,
                available: self.time.len(),
            });
        }
        let dt = self.time[1] - self.time[0];
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SpectrumError::InvalidSampleInterval { dt });
        }
        Ok(dt)
    }

    /// Compares every time step against `dt`. Returns `None` when `dt` is undefined.
    pub fn sampling_check(&self) -> Option<SamplingCheck> {
        let dt = self.sample_interval().ok()?;
        let mut max_relative_deviation = 0.0f64;
        let mut non_increasing_steps = 0;
        for pair in self.time.windows(2) {
            let step = pair[1] - pair[0];
            if step.is_nan() || step <= 0.0 {
                non_increasing_steps += 1;
                continue;
            }
            max_relative_deviation = max_relative_deviation.max(((step - dt) / dt).abs());
        }
        Some(SamplingCheck {
            dt,
            max_relative_deviation,
            non_increasing_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sample_interval_from_first_two_stamps() {
        let series = TimeSeries::new(array![1.0, 1.25, 1.5], array![0.0, 1.0, 0.0]).unwrap();
        assert_eq!(series.sample_interval().unwrap(), 0.25);
    }

    #[test]
    fn test_single_sample_has_no_interval() {
        let series = TimeSeries::new(array![0.0], array![3.0]).unwrap();
        assert!(matches!(
            series.sample_interval(),
            Err(SpectrumError::InsufficientData { available: 1, .. })
        ));
    }

    #[test]
    fn test_non_increasing_time_is_invalid_interval() {
        let series = TimeSeries::new(array![2.0, 2.0, 3.0], array![0.0, 1.0, 2.0]).unwrap();
        assert!(matches!(
            series.sample_interval(),
            Err(SpectrumError::InvalidSampleInterval { .. })
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = TimeSeries::new(array![0.0, 1.0], array![0.0]);
        assert!(matches!(result, Err(SpectrumError::MalformedInput { .. })));
    }

    #[test]
    fn test_sampling_check() {
        let uniform = TimeSeries::from_uniform(Array1::zeros(50), 0.1, 0.0);
        let check = uniform.sampling_check().unwrap();
        assert!(check.is_uniform());

        let jittered =
            TimeSeries::new(array![0.0, 0.1, 0.2, 0.35, 0.45], Array1::zeros(5)).unwrap();
        let check = jittered.sampling_check().unwrap();
        assert!(!check.is_uniform());
        assert!((check.max_relative_deviation - 0.5).abs() < 1e-9);

        let backwards = TimeSeries::new(array![0.0, 0.1, 0.05], Array1::zeros(3)).unwrap();
        assert_eq!(backwards.sampling_check().unwrap().non_increasing_steps, 1);
    }
}
