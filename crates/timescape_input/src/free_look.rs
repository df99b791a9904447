//! Free-look orbit camera
//!
//! Mouse-drag orbit used only while the capture machine is idle and no
//! hands are detected. The accumulated orbit persists as camera state even
//! after hands take over; only the input is gated.

/// Orbit state driven by mouse drags
pub struct FreeLookCamera {
    yaw: f32,
    pitch: f32,
    sensitivity: f32,
    last_position: Option<(f32, f32)>,
}

impl Default for FreeLookCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeLookCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.01,
            last_position: None,
        }
    }

    /// Builder: radians of orbit per pixel of drag
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Feed the current cursor position while the button is held.
    ///
    /// The first sample of a drag only anchors the reference point.
    pub fn drag(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.last_position {
            self.yaw += (x - last_x) * self.sensitivity;
            self.pitch += (y - last_y) * self.sensitivity;
            // Stop short of the poles so the scene never flips
            self.pitch = self.pitch.clamp(-1.55, 1.55);
        }
        self.last_position = Some((x, y));
    }

    /// Button released or orbit disabled for this frame
    pub fn end_drag(&mut self) {
        self.last_position = None;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_anchors_without_moving() {
        let mut camera = FreeLookCamera::new();
        camera.drag(100.0, 100.0);
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn test_drag_accumulates_orbit() {
        let mut camera = FreeLookCamera::new().with_sensitivity(0.01);
        camera.drag(100.0, 100.0);
        camera.drag(110.0, 90.0);
        assert!((camera.yaw() - 0.1).abs() < 1e-6);
        assert!((camera.pitch() + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_new_drag_does_not_jump() {
        let mut camera = FreeLookCamera::new();
        camera.drag(0.0, 0.0);
        camera.drag(10.0, 0.0);
        let yaw = camera.yaw();
        camera.end_drag();
        // A fresh drag far away must not teleport the orbit
        camera.drag(500.0, 500.0);
        assert_eq!(camera.yaw(), yaw);
    }

    #[test]
    fn test_pitch_clamped_at_poles() {
        let mut camera = FreeLookCamera::new().with_sensitivity(1.0);
        camera.drag(0.0, 0.0);
        camera.drag(0.0, 100.0);
        assert!(camera.pitch() <= 1.55);
    }
}
