// src/data_analysis/mod.rs

pub mod energy_spectrum;
pub mod fft_utils;
pub mod peak_locator;
pub mod pipeline;
pub mod preprocess;
pub mod variance_check;

// src/data_analysis/mod.rs
