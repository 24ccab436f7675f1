// src/data_analysis/reward_stats.rs

use ndarray::{Array1, Array2, Axis};
use ndarray_stats::QuantileExt;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{EpisodeSeries, RewardRun};

/// Stacks the runs into a (runs x episodes) matrix.
///
/// Fails on an empty collection or when any run's length differs from run 0.
pub fn runs_to_matrix(runs: &[RewardRun]) -> AnalysisResult<Array2<f64>> {
    let first = runs.first().ok_or(AnalysisError::NoRuns)?;
    let episodes = first.len();

    if let Some((run, other)) = runs
        .iter()
        .enumerate()
        .find(|(_, run)| run.len() != episodes)
    {
        return Err(AnalysisError::RaggedRuns {
            run,
            expected: episodes,
            found: other.len(),
        });
    }

    Ok(Array2::from_shape_fn((runs.len(), episodes), |(r, e)| {
        runs[r][e] as f64
    }))
}

fn mean_over_runs(matrix: &Array2<f64>) -> AnalysisResult<Array1<f64>> {
    matrix.mean_axis(Axis(0)).ok_or(AnalysisError::NoRuns)
}

/// Per-episode arithmetic mean across runs.
pub fn average(runs: &[RewardRun]) -> AnalysisResult<EpisodeSeries> {
    let matrix = runs_to_matrix(runs)?;
    Ok(mean_over_runs(&matrix)?.to_vec())
}

/// Per-episode population standard deviation (divisor N) around `mean`.
pub fn std_dev(runs: &[RewardRun], mean: &[f64]) -> AnalysisResult<EpisodeSeries> {
    let matrix = runs_to_matrix(runs)?;
    if mean.len() != matrix.ncols() {
        return Err(AnalysisError::MeanLengthMismatch {
            expected: matrix.ncols(),
            found: mean.len(),
        });
    }

    let mean = Array1::from(mean.to_vec());
    let squared_deviation = (&matrix - &mean).mapv(|d| d * d);
    Ok(mean_over_runs(&squared_deviation)?.mapv(f64::sqrt).to_vec())
}

/// Mean and spread of one reward log, ready for an error-bar plot.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardStats {
    pub mean: EpisodeSeries,
    pub std_dev: EpisodeSeries,
    pub run_count: usize,
}

impl RewardStats {
    pub fn from_runs(runs: &[RewardRun]) -> AnalysisResult<Self> {
        let mean = average(runs)?;
        let std_dev = std_dev(runs, &mean)?;
        Ok(Self {
            mean,
            std_dev,
            run_count: runs.len(),
        })
    }

    pub fn episode_count(&self) -> usize {
        self.mean.len()
    }

    /// Lowest `mean - std` and highest `mean + std` over all episodes.
    /// `None` when there are no episodes or a value is NaN.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mean = Array1::from(self.mean.clone());
        let std = Array1::from(self.std_dev.clone());
        let lower = &mean - &std;
        let upper = &mean + &std;
        let low = *lower.min().ok()?;
        let high = *upper.max().ok()?;
        Some((low, high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_and_std_of_mirrored_runs() {
        let runs = vec![vec![1, 2, 3], vec![3, 2, 1]];
        let mean = average(&runs).unwrap();
        assert_eq!(mean, vec![2.0, 2.0, 2.0]);
        assert_eq!(std_dev(&runs, &mean).unwrap(), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_identical_runs() {
        let run = vec![-40, -12, 5, 30];
        let runs = vec![run.clone(), run.clone(), run.clone()];
        let stats = RewardStats::from_runs(&runs).unwrap();
        assert_eq!(
            stats.mean,
            run.iter().map(|&r| r as f64).collect::<Vec<_>>()
        );
        assert_eq!(stats.std_dev, vec![0.0; 4]);
        assert_eq!(stats.run_count, 3);
        assert_eq!(stats.episode_count(), 4);
    }

    #[test]
    fn test_population_divisor() {
        // Values 0, 0, 6: mean 2, squared deviations 4, 4, 16 -> sqrt(24 / 3)
        let runs = vec![vec![0], vec![0], vec![6]];
        let mean = average(&runs).unwrap();
        let std = std_dev(&runs, &mean).unwrap();
        assert!((std[0] - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_std_uses_provided_mean() {
        let runs = vec![vec![2], vec![4]];
        // Around 0 instead of the true mean 3: sqrt((4 + 16) / 2)
        let std = std_dev(&runs, &[0.0]).unwrap();
        assert!((std[0] - 10f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_ragged_runs_fail() {
        let runs = vec![vec![1, 2, 3], vec![1, 2, 3], vec![1, 2]];
        assert!(matches!(
            average(&runs),
            Err(AnalysisError::RaggedRuns {
                run: 2,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_no_runs_fail() {
        let none: Vec<RewardRun> = Vec::new();
        assert!(matches!(average(&none), Err(AnalysisError::NoRuns)));
        assert!(matches!(std_dev(&none, &[]), Err(AnalysisError::NoRuns)));
    }

    #[test]
    fn test_mean_length_mismatch() {
        let runs = vec![vec![1, 2]];
        assert!(matches!(
            std_dev(&runs, &[1.0]),
            Err(AnalysisError::MeanLengthMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_extent() {
        let stats = RewardStats {
            mean: vec![-10.0, 0.0, 20.0],
            std_dev: vec![5.0, 1.0, 2.0],
            run_count: 2,
        };
        assert_eq!(stats.extent(), Some((-15.0, 22.0)));

        let empty = RewardStats {
            mean: vec![],
            std_dev: vec![],
            run_count: 1,
        };
        assert_eq!(empty.extent(), None);
    }
}
