// src/data_analysis/regression.rs

use std::fmt;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::MeasurementSeries;

/// Ordinary least-squares fit of `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
    /// Pearson correlation coefficient of the samples.
    pub r_value: f64,
    /// Standard error of the slope estimate.
    pub stderr: f64,
    pub sample_count: usize,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Human readable form, e.g. `f(x) = 3.5 + 0.25*x`.
    pub fn formula(&self) -> String {
        format!("f(x) = {} + {}*x", self.intercept, self.slope)
    }
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

/// Fits pixels-on-time for one calibration series.
///
/// `context` names the series in error messages (e.g. "left turn series").
/// Fewer than two samples, or samples that all share one time, cannot
/// determine a slope and are rejected.
pub fn fit_series(series: &MeasurementSeries, context: &str) -> AnalysisResult<LinearFit> {
    if series.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            context: context.to_string(),
            found: series.len(),
        });
    }

    let first_time = series[0].0;
    if series.iter().all(|&(t, _)| t == first_time) {
        return Err(AnalysisError::DegenerateSeries {
            context: context.to_string(),
            count: series.len(),
            time: first_time,
        });
    }

    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|&(t, p)| (t as f64, p as f64))
        .collect();
    Ok(least_squares(&points))
}

/// Two-pass least squares on points with non-zero x variance and n >= 2.
fn least_squares(points: &[(f64, f64)]) -> LinearFit {
    let n = points.len() as f64;
    let x_mean = points.iter().map(|p| p.0).sum::<f64>() / n;
    let y_mean = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for &(x, y) in points {
        let dx = x - x_mean;
        let dy = y - y_mean;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    let slope = ss_xy / ss_xx;
    let intercept = y_mean - slope * x_mean;

    let r_den = (ss_xx * ss_yy).sqrt();
    let r_value = if r_den == 0.0 {
        0.0
    } else {
        (ss_xy / r_den).clamp(-1.0, 1.0)
    };

    // Two points always lie on the line exactly.
    let stderr = if points.len() == 2 {
        0.0
    } else {
        let dof = n - 2.0;
        ((1.0 - r_value * r_value) * ss_yy / ss_xx / dof).max(0.0).sqrt()
    };

    LinearFit {
        intercept,
        slope,
        r_value,
        stderr,
        sample_count: points.len(),
    }
}
