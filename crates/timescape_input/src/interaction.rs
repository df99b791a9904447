//! Interaction controller
//!
//! Converts the active hand set into smoothed rotation angles and a scale
//! factor, and times the fist-hold gesture that arms a capture. All
//! smoothing is a fixed-factor lerp per frame; the feel is frame-rate
//! dependent unless time-scaled smoothing is enabled.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use crate::gesture::is_fist;
use crate::landmarks::INDEX_TIP;
use crate::pose::HandPose;

/// Linear map between two ranges, intentionally unclamped
#[inline]
fn map_range(value: f32, in_start: f32, in_end: f32, out_start: f32, out_end: f32) -> f32 {
    out_start + (value - in_start) / (in_end - in_start) * (out_end - out_start)
}

#[inline]
fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Smoothed hand-driven camera state plus the gesture-hold timer
pub struct InteractionController {
    rot_x: f32,
    rot_y: f32,
    rot_z: f32,
    scale: f32,
    zoom_speed: f32,

    hold_start: Option<Instant>,
    hold_hand: Option<usize>,
    cooldown_until: Option<Instant>,

    // Configuration
    input_width: f32,
    input_height: f32,
    smoothing_factor: f32,
    time_scaled_smoothing: bool,
    hold_duration: Duration,
    cooldown: Duration,
}

impl InteractionController {
    /// Create a controller starting at the given base scale
    pub fn new(base_scale: f32) -> Self {
        Self {
            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
            scale: base_scale,
            zoom_speed: 0.0,

            hold_start: None,
            hold_hand: None,
            cooldown_until: None,

            input_width: 640.0,
            input_height: 480.0,
            smoothing_factor: 0.1,
            time_scaled_smoothing: false,
            hold_duration: Duration::from_millis(3000),
            cooldown: Duration::from_millis(15000),
        }
    }

    /// Builder: set the detector frame size the keypoints are expressed in
    pub fn with_input_size(mut self, width: f32, height: f32) -> Self {
        self.input_width = width;
        self.input_height = height;
        self
    }

    /// Builder: set the per-frame lerp factor
    pub fn with_smoothing_factor(mut self, factor: f32) -> Self {
        self.smoothing_factor = factor;
        self
    }

    /// Builder: scale the lerp factor by elapsed time instead of per frame
    pub fn with_time_scaled_smoothing(mut self, enabled: bool) -> Self {
        self.time_scaled_smoothing = enabled;
        self
    }

    /// Builder: set how long a fist must be held to fire a capture
    pub fn with_hold_duration(mut self, duration: Duration) -> Self {
        self.hold_duration = duration;
        self
    }

    /// Builder: set the retrigger cooldown armed when a hold fires
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Advance one frame.
    ///
    /// With no hands the smoothed state freezes in place. With hands, yaw
    /// and pitch track the mean index fingertip, and with two hands roll
    /// and scale track the segment between the fingertips. Returns true
    /// when a completed fist hold requests a capture; the caller owns the
    /// actual phase change.
    pub fn update(
        &mut self,
        hands: &[HandPose],
        capture_idle: bool,
        now: Instant,
        dt: f32,
    ) -> bool {
        let prev_scale = self.scale;
        let mut hold_fired = false;

        if hands.is_empty() {
            // No hand is a fist, so any running hold cancels
            self.hold_start = None;
            self.hold_hand = None;
        } else {
            let factor = self.effective_factor(dt);

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for hand in hands {
                let tip = hand.keypoint(INDEX_TIP);
                sum_x += tip.x;
                sum_y += tip.y;
            }
            let center_x = sum_x / hands.len() as f32;
            let center_y = sum_y / hands.len() as f32;

            let target_rot_y = map_range(center_x, 0.0, self.input_width, -PI, PI);
            let target_rot_x = map_range(center_y, 0.0, self.input_height, -PI, PI);
            let mut target_rot_z = 0.0;

            if hands.len() >= 2 {
                let a = hands[0].keypoint(INDEX_TIP);
                let b = hands[1].keypoint(INDEX_TIP);
                let distance = a.distance(b);
                let target_scale = map_range(distance, 50.0, 400.0, 50.0, 400.0);
                self.scale = lerp(self.scale, target_scale, factor);
                target_rot_z = (b.y - a.y).atan2(b.x - a.x);
            }

            self.rot_x = lerp(self.rot_x, target_rot_x, factor);
            self.rot_y = lerp(self.rot_y, target_rot_y, factor);
            self.rot_z = lerp(self.rot_z, target_rot_z, factor);

            hold_fired = self.update_hold(hands, capture_idle, now);
        }

        self.zoom_speed = self.scale - prev_scale;
        hold_fired
    }

    /// Track the fist hold; returns true exactly once per completed hold
    fn update_hold(&mut self, hands: &[HandPose], capture_idle: bool, now: Instant) -> bool {
        let cooling = self
            .cooldown_until
            .map(|deadline| now < deadline)
            .unwrap_or(false);
        if !capture_idle || cooling {
            self.hold_start = None;
            self.hold_hand = None;
            return false;
        }

        match hands.iter().position(is_fist) {
            Some(index) => {
                let start = *self.hold_start.get_or_insert(now);
                self.hold_hand = Some(index);
                if now.duration_since(start) >= self.hold_duration {
                    log::info!("Fist held for {:?}, capture armed", self.hold_duration);
                    self.hold_start = None;
                    self.hold_hand = None;
                    self.cooldown_until = Some(now + self.cooldown);
                    return true;
                }
            }
            None => {
                self.hold_start = None;
                self.hold_hand = None;
            }
        }
        false
    }

    #[inline]
    fn effective_factor(&self, dt: f32) -> f32 {
        if self.time_scaled_smoothing && dt > 0.0 {
            // Equivalent cumulative response to the per-frame factor at 60fps
            1.0 - (1.0 - self.smoothing_factor).powf(dt * 60.0)
        } else {
            self.smoothing_factor
        }
    }

    /// Smoothed rotation (x, y, z) in radians
    pub fn rotation(&self) -> (f32, f32, f32) {
        (self.rot_x, self.rot_y, self.rot_z)
    }

    /// Smoothed scale factor in screen pixels per model unit
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Scale delta of the last update, drives the star-field warp
    pub fn zoom_speed(&self) -> f32 {
        self.zoom_speed
    }

    /// Hold progress in [0, 1] while a fist hold is running
    pub fn hold_progress(&self, now: Instant) -> Option<f32> {
        self.hold_start.map(|start| {
            let elapsed = now.duration_since(start).as_secs_f32();
            (elapsed / self.hold_duration.as_secs_f32()).clamp(0.0, 1.0)
        })
    }

    /// Index into the hand set of the hand holding the fist
    pub fn hold_hand(&self) -> Option<usize> {
        self.hold_hand
    }
}
