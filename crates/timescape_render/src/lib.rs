//! Software Rendering Library
//!
//! This crate draws the whole scene on the CPU into RGBA surfaces and
//! orchestrates the per-frame composition order.
//!
//! ## Key Components
//!
//! - [`Surface`] - RGBA pixel buffer with a depth buffer and alpha-blended
//!   line/disc/polyline drawing; the art buffer is just a second, larger
//!   `Surface`
//! - [`Viewport`] - perspective projection from pixel-unit world space to
//!   the screen, plus the orbit view transform
//! - [`TesseractLayer`] - spins, projects and strokes the hypercube
//! - [`FrameRenderer`] - fixed per-frame draw order, opacity blending and
//!   depth-buffer resets across all layers
//!
//! Layer drawing for stars, lightning, hands and the HUD lives in
//! [`layers`] and [`hud`].

mod color;
mod surface;
mod viewport;
mod tesseract;
pub mod layers;
pub mod hud;
mod frame;

pub use color::Color;
pub use surface::{SnapshotError, Surface};
pub use viewport::{orbit, ScreenPoint, Viewport, HAND_PLANE_Z};
pub use tesseract::TesseractLayer;
pub use frame::{FrameOutput, FrameRenderer};
