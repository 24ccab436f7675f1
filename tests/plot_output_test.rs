// tests/plot_output_test.rs

use std::fs;
use std::path::PathBuf;

use experiment_plots::data_input::calibration_log::{MalformedLinePolicy, TurnDirection};
use experiment_plots::data_input::reward_log::StripWidth;
use experiment_plots::plot_functions::plot_training_rewards::{
    plot_training_rewards, rewards_output_path, RewardPlotOptions,
};
use experiment_plots::plot_functions::plot_turn_calibration::{
    calibration_output_path, plot_turn_calibration,
};

/// Fresh per-test directory under the system temp dir.
fn output_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "experiment_plots_out_{}_{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create output dir");
    dir
}

#[test]
fn test_calibration_plot_written_with_both_fits() {
    let dir = output_dir("calibration");
    let input = dir.join("vehicleTurn.txt");
    // left: pixel = 2*time + 3, right: pixel = 0.5*time + 50 (sign dropped)
    fs::write(
        &input,
        "left time: 100 pixel: 203\n\
         right time: 100 pixel: -100\n\
         left time: 300 pixel: 603\n\
         right time: 300 pixel: -200\n\
         left time: 200 pixel: 403\n\
         right time: 200 pixel: -150\n",
    )
    .unwrap();

    let fits = plot_turn_calibration(&input, &dir, MalformedLinePolicy::Reject).unwrap();

    assert_eq!(fits.len(), 2);
    assert_eq!(fits[0].direction, TurnDirection::Left);
    assert_eq!(fits[1].direction, TurnDirection::Right);

    let (intercept, slope) = fits[0].coefficients();
    assert!((intercept - 3.0).abs() < 1e-9);
    assert!((slope - 2.0).abs() < 1e-9);
    let (intercept, slope) = fits[1].coefficients();
    assert!((intercept - 50.0).abs() < 1e-9);
    assert!((slope - 0.5).abs() < 1e-9);

    let png = calibration_output_path(&input, &dir);
    assert!(png.ends_with("vehicleTurn_TurnCalibration.png"));
    assert!(fs::metadata(&png).unwrap().len() > 0);
}

#[test]
fn test_calibration_plot_not_written_when_a_direction_is_missing() {
    let dir = output_dir("calibration_left_only");
    let input = dir.join("leftOnly.txt");
    fs::write(&input, "left time: 100 pixel: 203\nleft time: 200 pixel: 403\n").unwrap();

    assert!(plot_turn_calibration(&input, &dir, MalformedLinePolicy::Reject).is_err());
    assert!(!calibration_output_path(&input, &dir).exists());
}

#[test]
fn test_training_plot_written_with_stats() {
    let dir = output_dir("training");
    let primary = dir.join("totalReward_epsilon02.txt");
    let secondary = dir.join("totalReward_epsilon10.txt");
    fs::write(&primary, "[1,2,3]\n[3,2,1]\n").unwrap();
    fs::write(&secondary, "[-10, -20]\n[-30, -40]\n").unwrap();

    let options = RewardPlotOptions {
        compare: true,
        show_runs: true,
    };
    let (first, second) =
        plot_training_rewards(&primary, &secondary, &dir, StripWidth::default(), options).unwrap();

    assert_eq!(first.stats.mean, vec![2.0, 2.0, 2.0]);
    assert_eq!(first.stats.std_dev, vec![1.0, 0.0, 1.0]);
    assert_eq!(first.stats.run_count, 2);
    assert_eq!(second.stats.mean, vec![-20.0, -30.0]);
    assert_eq!(second.stats.std_dev, vec![10.0, 10.0]);

    let png = rewards_output_path(&primary, &dir);
    assert!(png.ends_with("totalReward_epsilon02_TrainingRewards.png"));
    assert!(fs::metadata(&png).unwrap().len() > 0);
}

#[test]
fn test_training_plot_fails_on_missing_secondary() {
    let dir = output_dir("training_missing");
    let primary = dir.join("primary.txt");
    fs::write(&primary, "[1,2,3]\n").unwrap();

    let result = plot_training_rewards(
        &primary,
        &dir.join("absent.txt"),
        &dir,
        StripWidth::default(),
        RewardPlotOptions::default(),
    );
    assert!(result.is_err());
    assert!(!rewards_output_path(&primary, &dir).exists());
}
