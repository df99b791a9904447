//! Hand Input Handling
//!
//! This crate turns hand-landmark streams from an external detector into
//! the rotation/scale state and capture triggers that drive the engine:
//!
//! - [`HandPose`] - 21 ordered 2D keypoints for one detected hand
//! - [`is_fist`] - pure fist/open classification over a pose
//! - [`PoseReceiver`] - single-latest-observation channel from the detector
//! - [`InteractionController`] - smoothed camera rotation/scale and the
//!   gesture-hold timer
//! - [`FreeLookCamera`] - mouse-drag orbit used when no hands are present

pub mod landmarks;
mod pose;
mod gesture;
mod channel;
mod interaction;
mod free_look;

pub use pose::{HandPose, Keypoint};
pub use gesture::is_fist;
pub use channel::{pose_channel, DetectorStatus, PoseReceiver, PoseSender};
pub use interaction::InteractionController;
pub use free_look::FreeLookCamera;
