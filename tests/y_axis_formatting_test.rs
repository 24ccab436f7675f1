// tests/y_axis_formatting_test.rs

use experiment_plots::plot_framework::format_axis_label;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_axis_formatting() {
        // Reward window ticks are plain integers
        assert_eq!(format_axis_label(-80.0), "-80");
        assert_eq!(format_axis_label(-40.0), "-40");
        assert_eq!(format_axis_label(0.0), "0");
        assert_eq!(format_axis_label(20.0), "20");
    }

    #[test]
    fn test_small_fractional_values_keep_one_decimal() {
        assert_eq!(format_axis_label(0.5), "0.5");
        assert_eq!(format_axis_label(5.7), "5.7");
        assert_eq!(format_axis_label(-2.5), "-2.5");
    }

    #[test]
    fn test_episode_axis_formatting() {
        // Episode numbers are whole, so no decimals even below 10
        assert_eq!(format_axis_label(1.0), "1");
        assert_eq!(format_axis_label(9.0), "9");
        assert_eq!(format_axis_label(20.0), "20");
    }

    #[test]
    fn test_large_values_use_suffixes() {
        // Turning times and pixel counts can run into the thousands
        assert_eq!(format_axis_label(1000.0), "1k");
        assert_eq!(format_axis_label(5000.0), "5k");
        assert_eq!(format_axis_label(-3000.0), "-3k");
        assert_eq!(format_axis_label(1_000_000.0), "1.0M");
        assert_eq!(format_axis_label(2_500_000.0), "2.5M");
    }

    #[test]
    fn test_fractional_thousands_stay_distinct() {
        // Turning-time ticks step by 200 ms once the axis spans a few seconds
        assert_eq!(format_axis_label(1200.0), "1.2k");
        assert_eq!(format_axis_label(1400.0), "1.4k");
        assert_eq!(format_axis_label(1500.0), "1.5k");
        assert_eq!(format_axis_label(12_500.0), "12.5k");
        assert_eq!(format_axis_label(-1500.0), "-1.5k");

        let ticks = [1000.0, 1200.0, 1400.0, 1500.0, 1600.0, 1800.0];
        let labels: Vec<String> = ticks.iter().map(|&t| format_axis_label(t)).collect();
        let mut unique = labels.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ticks.len(), "duplicate tick labels: {labels:?}");
        assert_eq!(labels[0], "1k");
    }
}
