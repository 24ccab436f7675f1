// src/plot_functions/plot_training_rewards.rs

use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};

use log::info;
use plotters::style::RGBColor;

use crate::constants::{
    COLOR_REWARD_PRIMARY, COLOR_REWARD_SECONDARY, COLOR_REWARD_SINGLE_RUN, LINE_WIDTH_PLOT,
    LINE_WIDTH_REWARD, PLOT_WIDTH, PRIMARY_REWARD_LABEL, REWARD_GRIDLINE_MAX,
    REWARD_GRIDLINE_MIN, REWARD_GRIDLINE_STEP, REWARD_PLOT_HEIGHT, REWARD_POINT_SIZE,
    REWARD_Y_MAX, REWARD_Y_MIN, SECONDARY_REWARD_LABEL,
};
use crate::data_analysis::reward_stats::RewardStats;
use crate::data_input::reward_log::{load_reward_runs, StripWidth};
use crate::error::AnalysisResult;
use crate::plot_framework::{calculate_range, draw_single_plot, PlotConfig, PlotSeries, SeriesStyle};
use crate::types::{RewardRun, RewardRuns};

/// One reward log with its statistics and how it is drawn.
#[derive(Debug, Clone)]
pub struct RewardDataset {
    pub label: String,
    pub color: RGBColor,
    pub runs: RewardRuns,
    pub stats: RewardStats,
}

impl RewardDataset {
    pub fn from_runs(label: &str, color: RGBColor, runs: RewardRuns) -> AnalysisResult<Self> {
        let stats = RewardStats::from_runs(&runs)?;
        Ok(Self {
            label: label.to_string(),
            color,
            runs,
            stats,
        })
    }

    pub fn load(
        input_file_path: &Path,
        label: &str,
        color: RGBColor,
        strip: StripWidth,
    ) -> AnalysisResult<Self> {
        let runs = load_reward_runs(input_file_path, strip)?;
        let dataset = Self::from_runs(label, color, runs)?;
        info!(
            "{}: {} run(s) x {} episode(s) from '{}'",
            dataset.label,
            dataset.stats.run_count,
            dataset.stats.episode_count(),
            input_file_path.display()
        );
        Ok(dataset)
    }
}

/// Which optional series to draw next to the primary error-bar series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewardPlotOptions {
    /// Also draw the secondary data set.
    pub compare: bool,
    /// Overlay every individual run of the drawn data sets as a dashed line.
    pub show_runs: bool,
}

/// Episode numbers 1..=count as plot x values.
pub fn episode_axis(count: usize) -> Vec<f64> {
    (1..=count).map(|e| e as f64).collect()
}

/// Reward levels of the horizontal reference lines.
pub fn reward_gridlines() -> Vec<f64> {
    (REWARD_GRIDLINE_MIN..=REWARD_GRIDLINE_MAX)
        .step_by(REWARD_GRIDLINE_STEP)
        .map(f64::from)
        .collect()
}

/// Fixed reward window, widened only when mean ± std leaves it.
pub fn reward_y_range<'a>(stats: impl IntoIterator<Item = &'a RewardStats>) -> Range<f64> {
    let (low, high) = stats
        .into_iter()
        .filter_map(RewardStats::extent)
        .fold((REWARD_Y_MIN, REWARD_Y_MAX), |(lo, hi), (l, h)| {
            (lo.min(l), hi.max(h))
        });

    if low < REWARD_Y_MIN || high > REWARD_Y_MAX {
        let (min, max) = calculate_range(low, high);
        min..max
    } else {
        REWARD_Y_MIN..REWARD_Y_MAX
    }
}

/// Mean line with population-std error bars.
pub fn error_bar_series(dataset: &RewardDataset) -> PlotSeries {
    let data = episode_axis(dataset.stats.episode_count())
        .into_iter()
        .zip(dataset.stats.mean.iter().copied())
        .collect();
    PlotSeries {
        data,
        label: dataset.label.clone(),
        color: dataset.color,
        stroke_width: LINE_WIDTH_REWARD,
        style: SeriesStyle::ErrorBars {
            errors: dataset.stats.std_dev.clone(),
            marker_size: REWARD_POINT_SIZE,
        },
    }
}

/// One unlabeled dashed line per run.
pub fn run_overlay_series(runs: &[RewardRun], color: RGBColor) -> Vec<PlotSeries> {
    runs.iter()
        .map(|run| PlotSeries {
            data: episode_axis(run.len())
                .into_iter()
                .zip(run.iter().map(|&r| r as f64))
                .collect(),
            label: String::new(),
            color,
            stroke_width: LINE_WIDTH_PLOT,
            style: SeriesStyle::DashedLine,
        })
        .collect()
}

/// Builds the reward chart. The secondary set is drawn only when `options.compare`.
pub fn reward_chart_config(
    primary: &RewardDataset,
    secondary: &RewardDataset,
    options: RewardPlotOptions,
) -> PlotConfig {
    let mut drawn = vec![primary];
    if options.compare {
        drawn.push(secondary);
    }

    let mut series = Vec::new();
    if options.show_runs {
        for dataset in &drawn {
            series.extend(run_overlay_series(&dataset.runs, COLOR_REWARD_SINGLE_RUN));
        }
    }
    series.extend(drawn.iter().map(|dataset| error_bar_series(dataset)));

    let episodes = drawn
        .iter()
        .map(|d| d.stats.episode_count())
        .max()
        .unwrap_or(0);
    let run_counts: Vec<String> = drawn
        .iter()
        .map(|d| d.stats.run_count.to_string())
        .collect();

    PlotConfig {
        title: format!(
            "Total reward per episode (mean ± std over {} runs)",
            run_counts.join("/")
        ),
        x_range: 0.5..(episodes as f64 + 0.5),
        y_range: reward_y_range(drawn.iter().map(|d| &d.stats)),
        series,
        x_label: "episode".to_string(),
        y_label: "total reward per episode".to_string(),
        reference_lines: reward_gridlines(),
        x_labels: episodes.max(1),
    }
}

pub fn rewards_output_path(primary_path: &Path, output_dir: &Path) -> PathBuf {
    let root_name = primary_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    output_dir.join(format!("{root_name}_TrainingRewards.png"))
}

/// Loads both reward logs, reduces them and writes the error-bar plot.
pub fn plot_training_rewards(
    primary_path: &Path,
    secondary_path: &Path,
    output_dir: &Path,
    strip: StripWidth,
    options: RewardPlotOptions,
) -> Result<(RewardDataset, RewardDataset), Box<dyn Error>> {
    let primary = RewardDataset::load(primary_path, PRIMARY_REWARD_LABEL, COLOR_REWARD_PRIMARY, strip)?;
    let secondary = RewardDataset::load(
        secondary_path,
        SECONDARY_REWARD_LABEL,
        COLOR_REWARD_SECONDARY,
        strip,
    )?;

    let plot_config = reward_chart_config(&primary, &secondary, options);
    let output_path = rewards_output_path(primary_path, output_dir);
    draw_single_plot(
        &output_path,
        (PLOT_WIDTH, REWARD_PLOT_HEIGHT),
        "Training Rewards",
        "Training Rewards",
        Some(&plot_config),
    )?;

    Ok((primary, secondary))
}
