// src/data_analysis/peak_locator.rs

use ndarray::Array1;

use crate::data_analysis::energy_spectrum::EnergySpectrum;
use crate::error::SpectrumError;

/// The most energetic bin of a spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralPeak {
    pub index: usize,
    pub frequency: f64,
    pub energy: f64,
    /// `1 / frequency`.
    pub period: f64,
}

/// Index of the largest finite value. Ties go to the highest index.
pub fn peak_index(energy: &Array1<f64>) -> Option<usize> {
    energy
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, best_v)) if v < best_v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Finds the spectral maximum and its period.
///
/// A maximum in the DC bin has no finite period and is reported as
/// `ZeroFrequencyPeak` instead of an infinite value.
pub fn locate_peak(spectrum: &EnergySpectrum) -> Result<SpectralPeak, SpectrumError> {
    if spectrum.is_empty() {
        return Err(SpectrumError::InsufficientData {
            context: "peak search (energy bins)",
            needed: 1,
            available: 0,
        });
    }
    let index = peak_index(&spectrum.energy).ok_or(SpectrumError::NonFiniteSpectrum {
        bins: spectrum.len(),
    })?;
    let frequency = spectrum.frequencies[index];
    if frequency == 0.0 {
        return Err(SpectrumError::ZeroFrequencyPeak);
    }
    Ok(SpectralPeak {
        index,
        frequency,
        energy: spectrum.energy[index],
        period: 1.0 / frequency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::energy_spectrum::frequency_axis;
    use ndarray::array;

    fn spectrum_from(energy: Array1<f64>) -> EnergySpectrum {
        let n_fft = (energy.len() - 1) * 2;
        EnergySpectrum {
            frequencies: frequency_axis(n_fft, 0.5),
            energy,
            dt: 0.5,
            n_fft,
        }
    }

    #[test]
    fn test_last_maximum_wins() {
        assert_eq!(peak_index(&array![1.0, 5.0, 2.0, 5.0, 0.5]), Some(3));
        assert_eq!(peak_index(&array![0.0, 0.0, 0.0]), Some(2));
    }

    #[test]
    fn test_non_finite_ignored() {
        assert_eq!(peak_index(&array![1.0, f64::NAN, 2.0, f64::INFINITY]), Some(2));
        assert_eq!(peak_index(&array![f64::NAN]), None);
        assert_eq!(peak_index(&Array1::zeros(0)), None);
    }

    #[test]
    fn test_period_is_reciprocal_frequency() {
        // frequencies = [0, 0.25, 0.5, 0.75, 1.0]
        let peak = locate_peak(&spectrum_from(array![0.0, 1.0, 9.0, 3.0, 0.1])).unwrap();
        assert_eq!(peak.index, 2);
        assert_eq!(peak.frequency, 0.5);
        assert_eq!(peak.energy, 9.0);
        assert_eq!(peak.period, 2.0);
    }

    #[test]
    fn test_all_nan_spectrum_is_reported_as_non_finite() {
        let result = locate_peak(&spectrum_from(Array1::from_elem(5, f64::NAN)));
        assert!(matches!(result, Err(SpectrumError::NonFiniteSpectrum { bins: 5 })));
    }

    #[test]
    fn test_dc_peak_has_no_period() {
        let result = locate_peak(&spectrum_from(array![10.0, 1.0, 2.0, 3.0, 0.1]));
        assert!(matches!(result, Err(SpectrumError::ZeroFrequencyPeak)));
    }
}
