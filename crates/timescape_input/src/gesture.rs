//! Fist detection
//!
//! A deliberately simple classifier: a finger is curled when its tip sits
//! closer to the palm than its PIP joint does. Three or more curled
//! fingers count as a fist. Stateless and deterministic given keypoints.

use crate::landmarks::{CURL_PAIRS, WRIST};
use crate::pose::HandPose;

/// Classify a hand pose as a fist.
///
/// Checks index, middle, ring and pinky against the palm (keypoint 0);
/// returns true when at least 3 of the 4 are curled.
pub fn is_fist(hand: &HandPose) -> bool {
    let palm = hand.keypoint(WRIST);

    let mut curled = 0;
    for &(tip, pip) in &CURL_PAIRS {
        let tip_dist = hand.keypoint(tip).distance_squared(palm);
        let pip_dist = hand.keypoint(pip).distance_squared(palm);
        if tip_dist < pip_dist {
            curled += 1;
        }
    }

    curled >= 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::KEYPOINT_COUNT;
    use crate::pose::Keypoint;

    /// Build a pose with the palm at the origin and each checked finger
    /// either extended (tip beyond pip) or curled (tip inside pip).
    fn synthetic_hand(curled: [bool; 4]) -> HandPose {
        let mut keypoints = [Keypoint::default(); KEYPOINT_COUNT];
        for (finger, &(tip, pip)) in CURL_PAIRS.iter().enumerate() {
            let dir = (finger as f32 + 1.0) * 10.0;
            keypoints[pip] = Keypoint::new(dir, 40.0);
            keypoints[tip] = if curled[finger] {
                Keypoint::new(dir, 20.0)
            } else {
                Keypoint::new(dir, 70.0)
            };
        }
        HandPose::new(keypoints)
    }

    #[test]
    fn test_all_curled_is_fist() {
        assert!(is_fist(&synthetic_hand([true; 4])));
    }

    #[test]
    fn test_all_extended_is_open() {
        assert!(!is_fist(&synthetic_hand([false; 4])));
    }

    #[test]
    fn test_two_curled_is_not_enough() {
        assert!(!is_fist(&synthetic_hand([true, true, false, false])));
    }

    #[test]
    fn test_three_curled_is_fist() {
        assert!(is_fist(&synthetic_hand([true, true, true, false])));
    }
}
