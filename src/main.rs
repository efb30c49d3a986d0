// src/main.rs

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use velocity_spectrum::constants::{DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_PAD_LEN, DEFAULT_VALUE_COLUMN};
use velocity_spectrum::data_analysis::preprocess::{NonFinitePolicy, PreprocessConfig};
use velocity_spectrum::data_input::series_parser::{parse_series_file, ParseOptions};
use velocity_spectrum::plot_functions::plot_energy_spectrum::{plot_energy_spectrum, ReferenceSlope};
use velocity_spectrum::{analyze_series, crate_version, AnalysisConfig};

/// Energy spectrum of a sampled velocity record, with a Parseval variance check.
#[derive(Parser, Debug)]
#[command(name = "spectrum_u")]
#[command(version)]
struct CliArgs {
    /// Comma-separated input file: time in column 0, signal in the value column
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Output PNG for the log-log spectrum plot
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Zeros added before and after the signal
    #[arg(long, default_value_t = DEFAULT_PAD_LEN)]
    pad: usize,

    /// 0-based column holding the signal
    #[arg(long, default_value_t = DEFAULT_VALUE_COLUMN)]
    value_column: usize,

    /// Keep NaN/inf samples in the trend fit, mean and spectrum instead of skipping
    /// them and zero-filling (the spectrum is then not finite)
    #[arg(long)]
    keep_non_finite: bool,

    /// Skip rendering the plot
    #[arg(long)]
    no_plot: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    println!("spectrum_u v{}", crate_version());

    // --- Data Input ---
    println!("\nReading '{}'...", args.input.display());
    let parse_options = ParseOptions {
        value_column: args.value_column,
        ..Default::default()
    };
    let series = parse_series_file(&args.input, &parse_options)?;
    let dt = series.sample_interval()?;
    println!("Finished reading {} data rows.", series.len());
    println!("Sample interval dt: {dt}");

    // --- Spectrum ---
    let config = AnalysisConfig {
        preprocess: PreprocessConfig {
            pad_len: args.pad,
            non_finite: if args.keep_non_finite {
                NonFinitePolicy::Propagate
            } else {
                NonFinitePolicy::Skip
            },
        },
        ..Default::default()
    };
    println!("\n--- Calculating Energy Spectrum ---");
    let analysis = analyze_series(&series, &config)?;
    println!(
        "  Padded length N: {} ({} samples + 2 x {} zeros)",
        analysis.signal.len(),
        analysis.signal.original_len,
        analysis.signal.pad_len
    );
    println!(
        "  Frequency bins: {} (resolution {:.4e}, Nyquist {})",
        analysis.spectrum.len(),
        analysis.spectrum.frequency_resolution(),
        analysis.spectrum.nyquist()
    );

    // --- Variance Check ---
    println!("\n--- Variance Check ---");
    analysis.variance.print_summary();
    if analysis.scaling_suspect(config.variance_tolerance) {
        println!(
            "  WARNING: variances differ by {:.2e} (relative); spectrum scaling is suspect.",
            analysis.variance.relative_error()
        );
    } else if !analysis.variance_consistent(config.variance_tolerance) {
        println!(
            "  Note: N = {} is odd, so bin N/2 is counted once; a shortfall of {:.2e} (relative) is expected.",
            analysis.spectrum.n_fft,
            analysis.variance.relative_error()
        );
    }

    // --- Peak ---
    let peak = &analysis.peak;
    println!(
        "\nPeak energy {:.4e} at frequency {:.4} (period {:.2})",
        peak.energy, peak.frequency, peak.period
    );

    // --- Plot ---
    if args.no_plot {
        println!("\nPlot skipped (--no-plot).");
    } else {
        println!("\n--- Generating Energy Spectrum Plot ---");
        let output_file = args.output.to_string_lossy();
        plot_energy_spectrum(
            &analysis.spectrum,
            Some(peak),
            &ReferenceSlope::default(),
            &output_file,
        )?;
    }

    Ok(())
}

// src/main.rs
