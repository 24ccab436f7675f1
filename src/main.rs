// src/main.rs

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{error, LevelFilter};

use experiment_plots::constants::{
    DEFAULT_CALIBRATION_LOG, DEFAULT_PRIMARY_REWARD_LOG, DEFAULT_SECONDARY_REWARD_LOG,
    DEFAULT_STRIP_LEADING, DEFAULT_STRIP_TRAILING,
};
use experiment_plots::crate_version;
use experiment_plots::data_input::calibration_log::MalformedLinePolicy;
use experiment_plots::data_input::reward_log::StripWidth;
use experiment_plots::plot_functions::plot_training_rewards::{
    plot_training_rewards, RewardPlotOptions,
};
use experiment_plots::plot_functions::plot_turn_calibration::plot_turn_calibration;

#[derive(Parser)]
#[command(name = "experiment_plots")]
#[command(about = "Plots turn calibration fits and RL training rewards")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fit pixels-on-time per turn direction and plot both fits")]
    Calibration(CalibrationArgs),
    #[command(about = "Average reward runs per episode and plot them with error bars")]
    Training(TrainingArgs),
}

#[derive(Args)]
struct CalibrationArgs {
    /// Turn calibration log
    #[arg(short, long, default_value = DEFAULT_CALIBRATION_LOG)]
    input: PathBuf,

    /// Directory for the PNG output
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Warn about and ignore lines that do not parse instead of aborting
    #[arg(long)]
    skip_malformed: bool,
}

#[derive(Args)]
struct TrainingArgs {
    /// Reward log plotted by default (epsilon = 0.02)
    #[arg(long, default_value = DEFAULT_PRIMARY_REWARD_LOG)]
    primary: PathBuf,

    /// Second reward log (epsilon = 0.1)
    #[arg(long, default_value = DEFAULT_SECONDARY_REWARD_LOG)]
    secondary: PathBuf,

    /// Directory for the PNG output
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Draw the second reward log as well
    #[arg(long)]
    compare: bool,

    /// Overlay every individual run as a dashed line
    #[arg(long)]
    show_runs: bool,

    /// Characters stripped from the start of each reward line
    #[arg(long, default_value_t = DEFAULT_STRIP_LEADING)]
    strip_leading: usize,

    /// Characters stripped from the end of each reward line, terminator included
    #[arg(long, default_value_t = DEFAULT_STRIP_TRAILING)]
    strip_trailing: usize,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Calibration(args) => {
            fs::create_dir_all(&args.output_dir)?;
            let policy = if args.skip_malformed {
                MalformedLinePolicy::Skip
            } else {
                MalformedLinePolicy::Reject
            };
            plot_turn_calibration(&args.input, &args.output_dir, policy)?;
        }
        Commands::Training(args) => {
            fs::create_dir_all(&args.output_dir)?;
            let strip = StripWidth {
                leading: args.strip_leading,
                trailing: args.strip_trailing,
            };
            let options = RewardPlotOptions {
                compare: args.compare,
                show_runs: args.show_runs,
            };
            plot_training_rewards(
                &args.primary,
                &args.secondary,
                &args.output_dir,
                strip,
                options,
            )?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = env_logger::builder()
        .filter_level(default_level)
        .parse_default_env()
        .try_init();

    log::debug!("experiment_plots {}", crate_version());

    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
