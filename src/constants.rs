// src/constants.rs

use plotters::style::colors::BLACK;
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;

// Calibration figure is two charts side by side; the reward figure is one wide chart.
pub const CALIBRATION_PLOT_HEIGHT: u32 = 550;
pub const REWARD_PLOT_HEIGHT: u32 = 690;

// --- Font sizes ---
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// --- Default input files (names used by the experiment rigs) ---
pub const DEFAULT_CALIBRATION_LOG: &str = "vehicleTurn.txt";
pub const DEFAULT_PRIMARY_REWARD_LOG: &str = "totalReward_epsilon02.txt";
pub const DEFAULT_SECONDARY_REWARD_LOG: &str = "totalReward_epsilon10.txt";

// Series labels for the two exploration-rate settings.
pub const PRIMARY_REWARD_LABEL: &str = "epsilon = 0.02";
pub const SECONDARY_REWARD_LABEL: &str = "epsilon = 0.1";

// Reward lines look like "[r1,r2,...,rN]\n": one leading char, two trailing chars.
pub const DEFAULT_STRIP_LEADING: usize = 1;
pub const DEFAULT_STRIP_TRAILING: usize = 2;

// Fixed reward window and horizontal reference lines.
pub const REWARD_Y_MIN: f64 = -80.0;
pub const REWARD_Y_MAX: f64 = 40.0;
pub const REWARD_GRIDLINE_MIN: i32 = -70;
pub const REWARD_GRIDLINE_MAX: i32 = 30;
pub const REWARD_GRIDLINE_STEP: usize = 10;

// --- Plot Color Assignments ---
pub const COLOR_MEASUREMENT_POINTS: RGBColor = RGBColor(0x00, 0x4E, 0x8A);
pub const COLOR_FIT_LINE: &RGBColor = &BLACK;
pub const COLOR_REWARD_PRIMARY: RGBColor = RGBColor(0x00, 0x4E, 0x8A);
pub const COLOR_REWARD_SECONDARY: RGBColor = RGBColor(0xB9, 0x0F, 0x22);
pub const COLOR_REWARD_SINGLE_RUN: RGBColor = RGBColor(0x9A, 0x9A, 0x9A);
pub const COLOR_GRIDLINE: RGBColor = RGBColor(0xD3, 0xD3, 0xD3);

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_REWARD: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Marker sizes (pixels).
pub const MEASUREMENT_POINT_SIZE: u32 = 3;
pub const REWARD_POINT_SIZE: u32 = 4;
pub const ERROR_BAR_CAP_WIDTH: u32 = 8;

// Dashed overlay for individual runs.
pub const DASH_SEGMENT_PX: u32 = 6;
pub const DASH_GAP_PX: u32 = 4;

// src/constants.rs
