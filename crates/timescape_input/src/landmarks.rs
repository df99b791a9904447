//! Hand landmark indices
//!
//! The detector delivers 21 keypoints per hand in the MediaPipe ordering:
//! wrist first, then four joints per digit from thumb to pinky.

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of keypoints per hand
pub const KEYPOINT_COUNT: usize = 21;

/// Joint chains for skeleton rendering, one polyline per digit,
/// each starting at the wrist
pub const FINGER_CHAINS: [[usize; 5]; 5] = [
    [WRIST, THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
    [WRIST, INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
    [WRIST, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
    [WRIST, RING_MCP, RING_PIP, RING_DIP, RING_TIP],
    [WRIST, PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
];

/// The five fingertip indices (lightning emission points)
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// (tip, pip) pairs checked by the fist classifier; the thumb is excluded
/// since its tip-to-palm distance barely changes when curled
pub const CURL_PAIRS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];
