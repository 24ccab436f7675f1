// src/data_input/mod.rs

pub mod calibration_log;
pub mod reward_log;

// src/data_input/mod.rs
