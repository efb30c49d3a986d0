// src/constants.rs

use plotters::style::colors::{BLACK, RED};
use plotters::style::RGBColor;

// Default input and output file names.
pub const DEFAULT_INPUT_FILE: &str = "data_test_spectrum_u.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "spectrum_u.png";

// Columns of the input CSV (0-based).
pub const TIME_COLUMN: usize = 0;
pub const DEFAULT_VALUE_COLUMN: usize = 1;

// Zeros prepended and appended to the preprocessed signal.
pub const DEFAULT_PAD_LEN: usize = 200;

// Relative tolerance for |Var(y) - sum(E)/(dt*N)| / Var(y).
pub const PARSEVAL_RELATIVE_TOLERANCE: f64 = 1e-6;

// Time steps deviating from dt by more than this fraction are reported as irregular sampling.
pub const SAMPLING_IRREGULARITY_TOLERANCE: f64 = 0.01;

// Plot dimensions (6.5 x 5 inch figure at 200 dpi).
pub const PLOT_WIDTH: u32 = 1300;
pub const PLOT_HEIGHT: u32 = 1000;

// Lower limit of the energy axis.
pub const ENERGY_AXIS_FLOOR: f64 = 1e-12;
// Headroom above the largest plotted value, as a multiplicative factor on a log axis.
pub const LOG_AXIS_HEADROOM_FACTOR: f64 = 10.0;

// Reference slope overlay: y = y_anchor * (x / x_start)^exponent on [x_start, x_end].
pub const REFERENCE_SLOPE_EXPONENT: f64 = -5.0 / 3.0;
pub const REFERENCE_SLOPE_X_START: f64 = 0.5;
pub const REFERENCE_SLOPE_X_END: f64 = 35.0;
pub const REFERENCE_SLOPE_Y_ANCHOR: f64 = 5.0;
pub const REFERENCE_SLOPE_LABEL_POS: (f64, f64) = (3.0, 0.5);
pub const REFERENCE_SLOPE_DASH_COUNT: usize = 24;

// Axis labels.
pub const X_AXIS_LABEL: &str = "Frequency [1/T]";
pub const Y_AXIS_LABEL: &str = "S_u(f)";

// Font sizes
pub const FONT_SIZE_AXIS_LABEL: i32 = 28;
pub const FONT_SIZE_TICK_LABEL: i32 = 28;
pub const FONT_SIZE_LEGEND: i32 = 22;
pub const FONT_SIZE_ANNOTATION: i32 = 28;

// --- Plot Color Assignments ---
pub const COLOR_ENERGY_SPECTRUM: &RGBColor = &BLACK;
pub const COLOR_REFERENCE_SLOPE: &RGBColor = &RED;
pub const COLOR_PEAK_LABEL: &RGBColor = &BLACK;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// src/constants.rs
