// tests/reward_pipeline_test.rs

use std::fs;
use std::path::PathBuf;

use experiment_plots::data_analysis::reward_stats::{average, std_dev, RewardStats};
use experiment_plots::data_input::reward_log::{load_reward_runs, StripWidth};
use experiment_plots::AnalysisError;

fn write_fixture(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "experiment_plots_rewards_{}_{}.txt",
        std::process::id(),
        name
    ));
    fs::write(&path, content).expect("write fixture");
    path
}

#[test]
fn test_load_average_and_std() {
    let path = write_fixture("basic", "[1,2,3]\n[3,2,1]\n");

    let runs = load_reward_runs(&path, StripWidth::default()).unwrap();
    assert_eq!(runs, vec![vec![1, 2, 3], vec![3, 2, 1]]);

    let mean = average(&runs).unwrap();
    assert_eq!(mean, vec![2.0, 2.0, 2.0]);
    assert_eq!(std_dev(&runs, &mean).unwrap(), vec![1.0, 0.0, 1.0]);

    fs::remove_file(path).ok();
}

#[test]
fn test_crlf_lines_strip_like_lf() {
    let path = write_fixture("crlf", "[-5, -7]\r\n[5, 7]\r\n");
    let runs = load_reward_runs(&path, StripWidth::default()).unwrap();
    assert_eq!(runs, vec![vec![-5, -7], vec![5, 7]]);
    fs::remove_file(path).ok();
}

#[test]
fn test_last_line_without_newline_loses_last_entry() {
    // The final line has no terminator, so the two stripped chars are "3]".
    let path = write_fixture("no_trailing_newline", "[1,2,3]\n[4,5,6]");

    let runs = load_reward_runs(&path, StripWidth::default()).unwrap();
    assert_eq!(runs, vec![vec![1, 2, 3], vec![4, 5]]);
    assert!(matches!(
        RewardStats::from_runs(&runs),
        Err(AnalysisError::RaggedRuns {
            run: 1,
            expected: 3,
            found: 2
        })
    ));

    fs::remove_file(path).ok();
}

#[test]
fn test_blank_lines_are_skipped() {
    let path = write_fixture("blank", "[10,20]\n\n[30,40]\n\n");
    let runs = load_reward_runs(&path, StripWidth::default()).unwrap();
    assert_eq!(runs.len(), 2);
    fs::remove_file(path).ok();
}

#[test]
fn test_invalid_entry_names_line() {
    let path = write_fixture("invalid", "[1,2]\n[3,oops]\n");
    let err = load_reward_runs(&path, StripWidth::default()).unwrap_err();
    match err {
        AnalysisError::InvalidReward { line, entry, .. } => {
            assert_eq!(line, 2);
            assert_eq!(entry, "oops");
        }
        other => panic!("unexpected error: {other}"),
    }
    fs::remove_file(path).ok();
}

#[test]
fn test_twenty_episode_runs() {
    let run_a: Vec<i64> = (0..20).map(|e| -60 + 3 * e).collect();
    let run_b: Vec<i64> = (0..20).map(|e| -50 + 3 * e).collect();
    let content = format!("{:?}\n{:?}\n", run_a, run_b).replace(' ', "");
    let path = write_fixture("twenty", &content);

    let runs = load_reward_runs(&path, StripWidth::default()).unwrap();
    let stats = RewardStats::from_runs(&runs).unwrap();
    assert_eq!(stats.episode_count(), 20);
    assert_eq!(stats.run_count, 2);
    assert_eq!(stats.mean[0], -55.0);
    assert!(stats.std_dev.iter().all(|&s| (s - 5.0).abs() < 1e-12));

    fs::remove_file(path).ok();
}
