//! Synthetic hand-pose source
//!
//! Stands in for the external camera + hand-landmark detector so the app
//! runs on any machine: the cursor drives a procedurally built hand,
//! holding the left button curls it into a fist, and a second mirrored
//! hand can be added for the two-handed scale/roll gestures.
//!
//! Deliveries go through the same [`PoseSender`] a real detector callback
//! would use, at a divided cadence to mimic a detector running slower
//! than the render loop.

use timescape_input::landmarks::{FINGER_CHAINS, KEYPOINT_COUNT, WRIST};
use timescape_input::{HandPose, Keypoint, PoseSender};

/// Joint distances from the palm along each digit: mcp, pip, dip, then
/// the tip, which lands inside the pip radius when the hand is a fist
const JOINT_RADII: [f32; 3] = [30.0, 50.0, 68.0];
const TIP_EXTENDED: f32 = 85.0;
const TIP_CURLED: f32 = 38.0;

/// Half-spread of the finger fan in radians
const FAN_SPREAD: f32 = 1.1;

/// Builds detector deliveries from the window cursor
pub struct PoseSimulator {
    input_width: f32,
    input_height: f32,
    cadence: u32,
    frame: u32,
}

impl PoseSimulator {
    pub fn new(input_width: f32, input_height: f32, cadence: u32) -> Self {
        Self {
            input_width,
            input_height,
            cadence: cadence.max(1),
            frame: 0,
        }
    }

    /// Called once per render frame; delivers every `cadence`th call
    pub fn update(
        &mut self,
        cursor: Option<(f32, f32)>,
        window_size: (f32, f32),
        hand_active: bool,
        fist: bool,
        second_hand: bool,
        tx: &PoseSender,
    ) {
        self.frame = self.frame.wrapping_add(1);
        if self.frame % self.cadence != 0 {
            return;
        }

        let mut hands = Vec::new();
        if hand_active {
            if let Some((cx, cy)) = cursor {
                let x = cx / window_size.0 * self.input_width;
                let y = cy / window_size.1 * self.input_height;
                hands.push(synthesize_hand(Keypoint::new(x, y), fist));
                if second_hand {
                    // Mirror across the detector frame's vertical center line
                    hands.push(synthesize_hand(
                        Keypoint::new(self.input_width - x, y),
                        fist,
                    ));
                }
            }
        }
        tx.send(hands);
    }
}

/// Build a plausible 21-keypoint hand around a palm center
fn synthesize_hand(palm: Keypoint, fist: bool) -> HandPose {
    let mut keypoints = [Keypoint::default(); KEYPOINT_COUNT];
    keypoints[WRIST] = palm;

    let tip_radius = if fist { TIP_CURLED } else { TIP_EXTENDED };
    for (finger, chain) in FINGER_CHAINS.iter().enumerate() {
        // Fan the digits over the top half circle, fingers pointing up
        let angle = -FAN_SPREAD + finger as f32 * (2.0 * FAN_SPREAD / 4.0);
        let dir = (angle.sin(), -angle.cos());

        for (joint, &index) in chain[1..].iter().enumerate() {
            let radius = if joint < JOINT_RADII.len() {
                JOINT_RADII[joint]
            } else {
                tip_radius
            };
            keypoints[index] = Keypoint::new(palm.x + dir.0 * radius, palm.y + dir.1 * radius);
        }
    }

    HandPose::new(keypoints)
}
