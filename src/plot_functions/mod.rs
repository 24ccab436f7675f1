// src/plot_functions/mod.rs

pub mod plot_training_rewards;
pub mod plot_turn_calibration;

// src/plot_functions/mod.rs
