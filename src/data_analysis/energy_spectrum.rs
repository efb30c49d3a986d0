// src/data_analysis/energy_spectrum.rs

use ndarray::Array1;
use realfft::num_complex::Complex64;

use crate::data_analysis::fft_utils;
use crate::error::SpectrumError;

/// One-sided power spectral density of a real signal, index-aligned with its frequency axis.
#[derive(Debug, Clone)]
pub struct EnergySpectrum {
    pub frequencies: Array1<f64>,
    pub energy: Array1<f64>,
    pub dt: f64,
    /// Length of the transformed (padded) signal.
    pub n_fft: usize,
}

impl EnergySpectrum {
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    /// Nyquist frequency `1 / (2 dt)`.
    pub fn nyquist(&self) -> f64 {
        0.5 / self.dt
    }

    /// Bin spacing of the transform, `1 / (N dt)`.
    pub fn frequency_resolution(&self) -> f64 {
        1.0 / (self.n_fft as f64 * self.dt)
    }

    /// For odd `N` the last bin still has a mirror partner but is counted once,
    /// so the spectrum falls slightly short of the signal variance.
    pub fn last_bin_unpaired(&self) -> bool {
        self.n_fft % 2 == 1
    }

    /// `(frequency, energy)` pairs for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(self.energy.iter())
            .map(|(&f, &e)| (f, e))
            .collect()
    }
}

/// `n_fft / 2 + 1` frequencies linearly spaced over `[0, 1/(2 dt)]`, end points exact.
pub fn frequency_axis(n_fft: usize, dt: f64) -> Array1<f64> {
    fft_utils::linspace_inclusive(0.0, 0.5 / dt, fft_utils::rfft_len(n_fft))
}

/// Folds the non-redundant half of a real signal's transform into a one-sided density.
///
/// Pxx[k] = |X[k]|^2 * dt / N for k = 0 and k = N/2 (no mirror partner)
/// Pxx[k] = 2 * |X[k]|^2 * dt / N otherwise
pub fn one_sided_energy(spectrum: &Array1<Complex64>, n_fft: usize, dt: f64) -> Array1<f64> {
    let scale = dt / n_fft as f64;
    let last = n_fft / 2;
    Array1::from_iter(spectrum.iter().enumerate().map(|(i, bin)| {
        let power = bin.norm_sqr() * scale;
        if i == 0 || i == last {
            power
        } else {
            2.0 * power
        }
    }))
}

/// Transforms the padded signal and returns its one-sided energy spectrum.
pub fn estimate_energy_spectrum(
    padded: &Array1<f64>,
    dt: f64,
) -> Result<EnergySpectrum, SpectrumError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SpectrumError::InvalidSampleInterval { dt });
    }
    let n_fft = padded.len();
    if n_fft < 2 {
        return Err(SpectrumError::InsufficientData {
            context: "spectral estimate",
            needed: 2,
            available: n_fft,
        });
    }

    let spectrum = fft_utils::fft_forward(padded)?;
    let energy = one_sided_energy(&spectrum, n_fft, dt);
    let frequencies = frequency_axis(n_fft, dt);
    debug_assert_eq!(energy.len(), frequencies.len());

    Ok(EnergySpectrum {
        frequencies,
        energy,
        dt,
        n_fft,
    })
}
