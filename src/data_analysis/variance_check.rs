// src/data_analysis/variance_check.rs

use ndarray::Array1;

use crate::data_analysis::energy_spectrum::EnergySpectrum;

/// Variance of the padded signal measured two ways. With correct spectral scaling the
/// two agree to rounding error (Parseval's theorem).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceReport {
    /// Population variance of the padded signal.
    pub variance_time: f64,
    /// `sum(energy) / (dt * N)`.
    pub variance_freq: f64,
}

impl VarianceReport {
    pub fn absolute_error(&self) -> f64 {
        (self.variance_time - self.variance_freq).abs()
    }

    /// Error relative to the time-domain variance. Falls back to the absolute
    /// error when that variance is zero.
    pub fn relative_error(&self) -> f64 {
        let scale = self.variance_time.abs();
        if scale > 0.0 {
            self.absolute_error() / scale
        } else {
            self.absolute_error()
        }
    }

    pub fn is_consistent(&self, relative_tolerance: f64) -> bool {
        self.relative_error() < relative_tolerance
    }

    pub fn print_summary(&self) {
        println!("Original variance: {:.4}", self.variance_time);
        println!("Variance calculated from FFT: {:.4}", self.variance_freq);
    }
}

/// Computes both variances. Diagnostic only: nothing upstream is changed.
pub fn check_variance(padded: &Array1<f64>, spectrum: &EnergySpectrum) -> VarianceReport {
    let n = padded.len();
    let variance_time = if n == 0 { 0.0 } else { padded.var(0.0) };
    let variance_freq = spectrum.energy.sum() / (spectrum.dt * spectrum.n_fft as f64);
    VarianceReport {
        variance_time,
        variance_freq,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::energy_spectrum::estimate_energy_spectrum;
    use ndarray::array;

    #[test]
    fn test_population_variance() {
        let signal = array![1.0, -1.0, 1.0, -1.0];
        let spectrum = estimate_energy_spectrum(&signal, 1.0).unwrap();
        let report = check_variance(&signal, &spectrum);
        assert!((report.variance_time - 1.0).abs() < 1e-12);
        assert!((report.variance_freq - 1.0).abs() < 1e-12);
        assert!(report.is_consistent(1e-9));
    }

    #[test]
    fn test_relative_error() {
        let report = VarianceReport {
            variance_time: 2.0,
            variance_freq: 2.2,
        };
        assert!((report.relative_error() - 0.1).abs() < 1e-12);
        assert!(!report.is_consistent(1e-6));

        let zero = VarianceReport {
            variance_time: 0.0,
            variance_freq: 1e-12,
        };
        assert_eq!(zero.relative_error(), 1e-12);
    }
}
