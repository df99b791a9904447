//! Particle systems sharing the engine's timing and opacity model
//!
//! - [`StarField`] - fixed-size ambient background with windowed neighbor
//!   links and a zoom-driven warp
//! - [`LightningSystem`] - transient decaying polylines emitted from
//!   fingertips
//!
//! All randomness flows through a caller-supplied [`rand::Rng`] so tests
//! drive both systems with a seeded generator.

mod stars;
mod lightning;

pub use stars::{Star, StarField, StarLink};
pub use lightning::{LightningBolt, LightningSystem};
