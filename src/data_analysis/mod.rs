// src/data_analysis/mod.rs

pub mod regression;
pub mod reward_stats;

// src/data_analysis/mod.rs
