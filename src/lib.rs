// src/lib.rs - Library interface for the spectrum pipeline and its plotting layer

pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod plot_framework;
pub mod plot_functions;

pub use data_analysis::pipeline::{analyze_series, analyze_values, AnalysisConfig, SpectrumAnalysis};
pub use error::SpectrumError;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
