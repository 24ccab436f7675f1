// src/types.rs
// Type aliases shared between parsing, analysis and plotting

use std::ops::Range;

use crate::plot_framework::PlotSeries;

/// (time in ms, pixels turned) pairs for one turn direction, sorted by time.
pub type MeasurementSeries = Vec<(u64, u64)>;

/// Total reward per episode for one training run.
pub type RewardRun = Vec<i64>;

/// All runs read from one reward log.
pub type RewardRuns = Vec<RewardRun>;

/// Per-episode statistic (mean or standard deviation) across runs.
pub type EpisodeSeries = Vec<f64>;

// Chart data handed to the plot framework
pub type ChartPlotData = (
    String,          // title
    Range<f64>,      // x_range
    Range<f64>,      // y_range
    Vec<PlotSeries>, // series
    String,          // x_label
    String,          // y_label
);
