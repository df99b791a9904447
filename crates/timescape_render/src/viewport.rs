//! Perspective viewport
//!
//! World space is measured in screen pixels with the origin at the
//! viewport center, y pointing down and the camera on the +z axis looking
//! at the origin. The eye distance is chosen so geometry on the z = 0
//! plane maps one-to-one to pixels, which keeps the star spread, the hand
//! plane and the tesseract scale all in the same units.

use timescape_input::Keypoint;
use timescape_math::Vec3;

/// Depth of the plane hands (and bolt anchors) are drawn on, slightly
/// behind the tesseract but well in front of the stars
pub const HAND_PLANE_Z: f32 = -50.0;

/// Vertical field of view
const FOV_RADIANS: f32 = std::f32::consts::PI / 3.0;

/// A world point projected to pixel coordinates; z is kept in world units
/// for depth testing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Apply the free-look orbit to a world point
#[inline]
pub fn orbit(p: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    p.rotated_y(yaw).rotated_x(pitch)
}

/// Projects world points onto one surface
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    width: f32,
    height: f32,
    focal: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        let height_f = height as f32;
        Self {
            width: width as f32,
            height: height_f,
            focal: (height_f * 0.5) / (FOV_RADIANS * 0.5).tan(),
        }
    }

    /// Perspective-project a world point. Returns `None` for points at or
    /// behind the eye, which cannot be drawn meaningfully.
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        let denom = self.focal - p.z;
        if !(denom > 1.0) {
            return None;
        }
        let factor = self.focal / denom;
        Some(ScreenPoint {
            x: self.width * 0.5 + p.x * factor,
            y: self.height * 0.5 + p.y * factor,
            z: p.z,
        })
    }

    /// Map a detector-frame keypoint onto the hand plane, mirroring the
    /// detector frame onto the centered world
    pub fn map_detector(&self, kp: Keypoint, input_width: f32, input_height: f32) -> Vec3 {
        Vec3::new(
            kp.x / input_width * self.width - self.width * 0.5,
            kp.y / input_height * self.height - self.height * 0.5,
            HAND_PLANE_Z,
        )
    }
}
