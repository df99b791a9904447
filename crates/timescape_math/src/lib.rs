//! 4D Mathematics Library
//!
//! This crate provides the vector and geometry types for the Timescape engine.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4D vector with x, y, z, w components
//! - [`Vec3`] - 3D vector used for projected geometry and particles
//! - [`RotationPlane`] - the six rotation planes of 4D space
//! - [`Hypercube`] - the 16-vertex tesseract with its edge relation
//!
//! ## Projection
//!
//! [`hypercube::rotate`] spins a vertex in the ZW and XY planes and
//! [`hypercube::project`] performs the 4D-to-3D perspective divide.

mod vec3;
mod vec4;
pub mod plane;
pub mod hypercube;

pub use vec3::Vec3;
pub use vec4::Vec4;
pub use plane::{rotate_in_plane, RotationPlane};
pub use hypercube::Hypercube;
