//! Timescape - gesture-driven tesseract visualizer
//!
//! Library surface for the application shell: configuration loading, the
//! window/frame-loop glue and the simulated hand-pose source. The engine
//! itself lives in the `timescape_*` workspace crates.

pub mod app;
pub mod config;
pub mod pose_sim;
