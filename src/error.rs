// src/error.rs

use thiserror::Error;

/// Errors raised while loading a series or estimating its spectrum.
#[derive(Error, Debug)]
pub enum SpectrumError {
    #[error("Insufficient data for {context}: need {needed}, have {available}")]
    InsufficientData {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("Invalid sample interval: {dt} (must be finite and > 0)")]
    InvalidSampleInterval { dt: f64 },

    /// The spectral maximum sits in the DC bin, so `1 / frequency` has no finite value.
    #[error("Spectral peak is at zero frequency; its period is undefined")]
    ZeroFrequencyPeak,

    /// Peak search found energy bins but none of them finite, typically from
    /// non-finite samples kept under `NonFinitePolicy::Propagate`.
    #[error("Spectrum has no finite energy bins ({bins} bins are NaN or infinite)")]
    NonFiniteSpectrum { bins: usize },

    #[error(transparent)]
    Transform(#[from] realfft::FftError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpectrumError {
    pub(crate) fn malformed(line: Option<u64>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let reason = match line {
            Some(line) => format!("line {line}: {reason}"),
            None => reason,
        };
        SpectrumError::MalformedInput { reason }
    }
}


// src/error.rs
