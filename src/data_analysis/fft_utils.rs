// src/data_analysis/fft_utils.rs

use ndarray::Array1;
use realfft::num_complex::Complex64;
use realfft::RealFftPlanner;

use crate::error::SpectrumError;

/// Number of non-redundant bins in the transform of a real signal of length `n`.
pub fn rfft_len(n: usize) -> usize {
    n / 2 + 1
}

/// Computes the Fast Fourier Transform (FFT) of a real-valued signal.
/// Returns bins `0..=n/2` of the unnormalised forward transform; the remaining
/// bins are their complex conjugates. Any length is accepted. Handles empty input.
pub fn fft_forward(data: &Array1<f64>) -> Result<Array1<Complex64>, SpectrumError> {
    if data.is_empty() {
        return Ok(Array1::zeros(0));
    }
    let n = data.len();
    let mut input = data.to_vec();
    let planner = RealFftPlanner::<f64>::new().plan_fft_forward(n);
    let mut output = planner.make_output_vec();
    planner.process(&mut input, &mut output)?;
    Ok(Array1::from(output))
}

/// `n` values evenly spaced over `[start, stop]`, with both end points exact.
pub fn linspace_inclusive(start: f64, stop: f64, n: usize) -> Array1<f64> {
    let mut values = Array1::linspace(start, stop, n);
    if n > 1 {
        values[0] = start;
        values[n - 1] = stop;
    }
    values
}
