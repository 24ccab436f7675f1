// src/plot_functions/plot_turn_calibration.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{
    CALIBRATION_PLOT_HEIGHT, COLOR_FIT_LINE, COLOR_MEASUREMENT_POINTS, LINE_WIDTH_PLOT,
    MEASUREMENT_POINT_SIZE, PLOT_WIDTH,
};
use crate::data_analysis::regression::{fit_series, LinearFit};
use crate::data_input::calibration_log::{
    parse_calibration_file, read_calibration_log, series_for, MalformedLinePolicy,
    TurnDirection, TurnMeasurement,
};
use crate::error::AnalysisResult;
use crate::plot_framework::{calculate_range, draw_side_by_side_plot, PlotConfig, PlotSeries, SeriesStyle};
use crate::types::{ChartPlotData, MeasurementSeries};

/// Measurements and fitted line for one turn direction.
#[derive(Debug, Clone)]
pub struct DirectionFit {
    pub direction: TurnDirection,
    pub series: MeasurementSeries,
    pub fit: LinearFit,
}

impl DirectionFit {
    /// (intercept, slope)
    pub fn coefficients(&self) -> (f64, f64) {
        (self.fit.intercept, self.fit.slope)
    }

    /// Console line, e.g. `left: f(x) = 3 + 2*x`.
    pub fn summary_line(&self) -> String {
        format!("{}: {}", self.direction, self.fit.formula())
    }
}

fn fit_context(direction: TurnDirection) -> String {
    format!("{direction} turn series")
}

/// Fits the series of one direction from already parsed measurements.
pub fn fit_measurements(
    measurements: &[TurnMeasurement],
    direction: TurnDirection,
) -> AnalysisResult<DirectionFit> {
    let series = series_for(measurements, direction);
    let fit = fit_series(&series, &fit_context(direction))?;
    Ok(DirectionFit {
        direction,
        series,
        fit,
    })
}

/// Reads the log and fits one direction. Returns (intercept, slope).
pub fn fit_direction(
    input_file_path: &Path,
    direction: TurnDirection,
    policy: MalformedLinePolicy,
) -> AnalysisResult<(f64, f64)> {
    let series = parse_calibration_file(input_file_path, direction, policy)?;
    let fit = fit_series(&series, &fit_context(direction))?;
    Ok((fit.intercept, fit.slope))
}

/// Scatter of the measurements plus the fitted line across the measured time span.
pub fn calibration_chart_data(direction_fit: &DirectionFit) -> Option<ChartPlotData> {
    let series = &direction_fit.series;
    let (first, last) = (series.first()?, series.last()?);
    let (time_min, time_max) = (first.0 as f64, last.0 as f64);

    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|&(t, p)| (t as f64, p as f64))
        .collect();
    let fit_line = vec![
        (time_min, direction_fit.fit.predict(time_min)),
        (time_max, direction_fit.fit.predict(time_max)),
    ];

    let (val_min, val_max) = points
        .iter()
        .map(|p| p.1)
        .chain(fit_line.iter().map(|p| p.1))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    let (x_min, x_max) = calculate_range(time_min, time_max);
    let (y_min, y_max) = calculate_range(val_min, val_max);

    let plot_series = vec![
        PlotSeries {
            data: points,
            label: "measurements".to_string(),
            color: COLOR_MEASUREMENT_POINTS,
            stroke_width: LINE_WIDTH_PLOT,
            style: SeriesStyle::Points {
                size: MEASUREMENT_POINT_SIZE,
            },
        },
        PlotSeries::line(
            fit_line,
            &direction_fit.fit.formula(),
            *COLOR_FIT_LINE,
            LINE_WIDTH_PLOT,
        ),
    ];

    Some((
        format!("{} turn", direction_fit.direction),
        x_min..x_max,
        y_min..y_max,
        plot_series,
        "robot turning time (ms)".to_string(),
        "pixels turned".to_string(),
    ))
}

pub fn calibration_output_path(input_file_path: &Path, output_dir: &Path) -> PathBuf {
    let root_name = input_file_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    output_dir.join(format!("{root_name}_TurnCalibration.png"))
}

/// Fits both directions, prints each formula and writes the side-by-side plot.
pub fn plot_turn_calibration(
    input_file_path: &Path,
    output_dir: &Path,
    policy: MalformedLinePolicy,
) -> Result<Vec<DirectionFit>, Box<dyn Error>> {
    let measurements = read_calibration_log(input_file_path, policy)?;

    let mut fits = Vec::with_capacity(TurnDirection::ALL.len());
    for direction in TurnDirection::ALL {
        let direction_fit = fit_measurements(&measurements, direction)?;
        println!("{}", direction_fit.summary_line());
        debug!(
            "{} fit: n={} r={:.4} stderr={:.6}",
            direction,
            direction_fit.fit.sample_count,
            direction_fit.fit.r_value,
            direction_fit.fit.stderr
        );
        fits.push(direction_fit);
    }

    let output_path = calibration_output_path(input_file_path, output_dir);
    let root_name = input_file_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let panel_names: Vec<&str> = fits.iter().map(|f| f.direction.as_str()).collect();

    draw_side_by_side_plot(
        &output_path,
        (PLOT_WIDTH, CALIBRATION_PLOT_HEIGHT),
        &root_name,
        "Turn Calibration",
        &panel_names,
        |panel_index| {
            fits.get(panel_index)
                .and_then(calibration_chart_data)
                .map(PlotConfig::from_chart_data)
        },
    )?;

    Ok(fits)
}
