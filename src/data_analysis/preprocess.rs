// src/data_analysis/preprocess.rs

use ndarray::{s, Array1, ArrayView1};

use crate::constants::DEFAULT_PAD_LEN;
use crate::error::SpectrumError;

/// How NaN and infinite samples are treated by the trend fit and the mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Leave non-finite samples out of the trend fit and the mean (NaN-aware mean),
    /// then set them to zero, the mean of the centred signal.
    #[default]
    Skip,
    /// Every sample takes part; a single NaN turns the whole result into NaN.
    Propagate,
}

#[derive(Debug, Clone, Copy)]
pub struct PreprocessConfig {
    /// Zeros added on each side of the signal.
    pub pad_len: usize,
    pub non_finite: NonFinitePolicy,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            pad_len: DEFAULT_PAD_LEN,
            non_finite: NonFinitePolicy::default(),
        }
    }
}

/// Detrended, mean-free signal with `pad_len` zeros on both ends.
#[derive(Debug, Clone)]
pub struct PaddedSignal {
    pub samples: Array1<f64>,
    pub original_len: usize,
    pub pad_len: usize,
}

impl PaddedSignal {
    /// Padded length `N`.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The non-padded region.
    pub fn unpadded(&self) -> ArrayView1<'_, f64> {
        self.samples
            .slice(s![self.pad_len..self.pad_len + self.original_len])
    }
}

/// Subtracts the least-squares line `a + b*i` fitted against sample index `i`.
pub fn detrend_linear(
    data: &Array1<f64>,
    policy: NonFinitePolicy,
) -> Result<Array1<f64>, SpectrumError> {
    let n = data.len();
    if n < 2 {
        return Err(SpectrumError::InsufficientData {
            context: "linear detrend",
            needed: 2,
            available: n,
        });
    }

    let used = |x: f64| policy == NonFinitePolicy::Propagate || x.is_finite();

    let mut count = 0usize;
    let mut sum_i = 0.0;
    let mut sum_x = 0.0;
    for (i, &x) in data.iter().enumerate() {
        if used(x) {
            count += 1;
            sum_i += i as f64;
            sum_x += x;
        }
    }
    if count < 2 {
        return Err(SpectrumError::InsufficientData {
            context: "linear detrend (finite samples)",
            needed: 2,
            available: count,
        });
    }
    let mean_i = sum_i / count as f64;
    let mean_x = sum_x / count as f64;

    // Centred sums keep the fit well conditioned for long records.
    let mut s_ix = 0.0;
    let mut s_ii = 0.0;
    for (i, &x) in data.iter().enumerate() {
        if used(x) {
            let di = i as f64 - mean_i;
            s_ix += di * (x - mean_x);
            s_ii += di * di;
        }
    }
    let slope = s_ix / s_ii;

    Ok(Array1::from_iter(
        data.iter()
            .enumerate()
            .map(|(i, &x)| x - (mean_x + slope * (i as f64 - mean_i))),
    ))
}

/// Subtracts the arithmetic mean.
pub fn remove_mean(
    data: &Array1<f64>,
    policy: NonFinitePolicy,
) -> Result<Array1<f64>, SpectrumError> {
    let mean = match policy {
        NonFinitePolicy::Skip => {
            let (sum, count) = data
                .iter()
                .filter(|x| x.is_finite())
                .fold((0.0, 0usize), |(sum, count), &x| (sum + x, count + 1));
            if count == 0 {
                return Err(SpectrumError::InsufficientData {
                    context: "mean removal (finite samples)",
                    needed: 1,
                    available: 0,
                });
            }
            sum / count as f64
        }
        NonFinitePolicy::Propagate => data.mean().ok_or(SpectrumError::InsufficientData {
            context: "mean removal",
            needed: 1,
            available: 0,
        })?,
    };
    Ok(data.mapv(|x| x - mean))
}

/// Prepends and appends `pad_len` zeros.
pub fn zero_pad(data: &Array1<f64>, pad_len: usize) -> Array1<f64> {
    let mut padded = Array1::<f64>::zeros(data.len() + 2 * pad_len);
    padded
        .slice_mut(s![pad_len..pad_len + data.len()])
        .assign(data);
    padded
}

/// Detrend, remove the mean and zero-pad `values`.
pub fn preprocess(
    values: &Array1<f64>,
    config: &PreprocessConfig,
) -> Result<PaddedSignal, SpectrumError> {
    let detrended = detrend_linear(values, config.non_finite)?;
    let mut centred = remove_mean(&detrended, config.non_finite)?;
    let non_finite = centred.iter().filter(|x| !x.is_finite()).count();
    if non_finite > 0 {
        match config.non_finite {
            NonFinitePolicy::Skip => {
                centred.mapv_inplace(|x| if x.is_finite() { x } else { 0.0 });
                tracing::warn!("{} non-finite samples replaced by the mean (zero)", non_finite);
            }
            NonFinitePolicy::Propagate => tracing::warn!(
                "{} non-finite samples remain after preprocessing; spectrum will not be finite",
                non_finite
            ),
        }
    }
    Ok(PaddedSignal {
        samples: zero_pad(&centred, config.pad_len),
        original_len: values.len(),
        pad_len: config.pad_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_detrend_removes_line_exactly() {
        let data = Array1::from_iter((0..50).map(|i| 3.0 - 0.25 * i as f64));
        let detrended = detrend_linear(&data, NonFinitePolicy::Skip).unwrap();
        for v in detrended.iter() {
            assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_detrend_keeps_zero_mean_residual() {
        let data = array![1.0, 4.0, 2.0, 8.0, 5.0, 7.0];
        let detrended = detrend_linear(&data, NonFinitePolicy::Skip).unwrap();
        assert_abs_diff_eq!(detrended.sum(), 0.0, epsilon = 1e-12);
        // Residual is orthogonal to the index ramp.
        let ramp_dot: f64 = detrended.iter().enumerate().map(|(i, v)| i as f64 * v).sum();
        assert_abs_diff_eq!(ramp_dot, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_detrend_needs_two_samples() {
        let err = detrend_linear(&array![1.0], NonFinitePolicy::Skip).unwrap_err();
        assert!(matches!(err, SpectrumError::InsufficientData { available: 1, .. }));
    }

    #[test]
    fn test_detrend_skips_nan_in_fit() {
        let data = array![0.0, 1.0, f64::NAN, 3.0, 4.0];
        let detrended = detrend_linear(&data, NonFinitePolicy::Skip).unwrap();
        assert!(detrended[2].is_nan());
        for i in [0usize, 1, 3, 4] {
            assert_abs_diff_eq!(detrended[i], 0.0, epsilon = 1e-12);
        }

        let propagated = detrend_linear(&data, NonFinitePolicy::Propagate).unwrap();
        assert!(propagated.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_remove_mean_skip_policy() {
        let data = array![1.0, f64::NAN, 3.0];
        let centred = remove_mean(&data, NonFinitePolicy::Skip).unwrap();
        assert_eq!(centred[0], -1.0);
        assert!(centred[1].is_nan());
        assert_eq!(centred[2], 1.0);

        let poisoned = remove_mean(&data, NonFinitePolicy::Propagate).unwrap();
        assert!(poisoned[0].is_nan());
    }

    #[test]
    fn test_all_non_finite_is_insufficient() {
        let data = array![f64::NAN, f64::INFINITY, f64::NAN];
        assert!(matches!(
            remove_mean(&data, NonFinitePolicy::Skip),
            Err(SpectrumError::InsufficientData { .. })
        ));
        assert!(matches!(
            preprocess(&data, &PreprocessConfig::default()),
            Err(SpectrumError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_preprocess_fills_non_finite_under_skip() {
        let values = array![1.0, 2.0, f64::NAN, 4.0, f64::INFINITY, 6.0];
        let config = PreprocessConfig {
            pad_len: 2,
            non_finite: NonFinitePolicy::Skip,
        };
        let padded = preprocess(&values, &config).unwrap();
        assert!(padded.samples.iter().all(|v| v.is_finite()));
        assert_eq!(padded.samples[2 + 2], 0.0);
        assert_eq!(padded.samples[2 + 4], 0.0);

        let config = PreprocessConfig {
            non_finite: NonFinitePolicy::Propagate,
            ..config
        };
        let padded = preprocess(&values, &config).unwrap();
        assert!(padded.unpadded().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_zero_pad_layout() {
        let padded = zero_pad(&array![1.0, 2.0], 3);
        assert_eq!(padded.to_vec(), vec![0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(zero_pad(&array![1.0, 2.0], 0).to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_preprocess_lengths_and_mean() {
        let values = Array1::from_iter((0..100).map(|i| 2.0 + 0.01 * i as f64 + (i as f64).sin()));
        let config = PreprocessConfig {
            pad_len: 20,
            ..Default::default()
        };
        let padded = preprocess(&values, &config).unwrap();
        assert_eq!(padded.len(), 140);
        assert_eq!(padded.original_len, 100);
        assert!(padded.samples.slice(s![..20]).iter().all(|&v| v == 0.0));
        assert!(padded.samples.slice(s![120..]).iter().all(|&v| v == 0.0));
        assert_abs_diff_eq!(padded.unpadded().sum(), 0.0, epsilon = 1e-10);
        assert_eq!(padded.unpadded().len(), 100);
    }
}
