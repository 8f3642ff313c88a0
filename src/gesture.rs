//! Turns one hand's 21 landmarks into the per-frame gesture the board consumes.
//!
//! Landmarks arrive normalized to [0,1] relative to the video frame; every
//! distance here is measured in canvas pixels so the thresholds stay stable
//! across aspect ratios.

use serde::{Deserialize, Serialize};

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;
pub const LANDMARK_COUNT: usize = 21;

/// Skeleton edges used when drawing a detected hand.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (0, 17), (17, 18), (18, 19), (19, 20),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Thumb tip to index tip, below this counts as a pinch.
    pub pinch_px: f64,
    /// Mean fingertip to wrist, below this counts as a closed hand.
    pub closed_px: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            pinch_px: 40.0,
            closed_px: 150.0,
        }
    }
}

/// Interpreted gesture for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandGesture {
    /// Index tip in canvas pixels, mirrored to match the flipped video.
    pub x: f64,
    pub y: f64,
    pub pinching: bool,
    pub closed: bool,
    pub pinch_px: f64,
    pub spread_px: f64,
}

fn pixel_distance(a: &Landmark, b: &Landmark, w: f64, h: f64) -> f64 {
    let dx = (a.x - b.x) * w;
    let dy = (a.y - b.y) * h;
    (dx * dx + dy * dy).sqrt()
}

/// Returns `None` when the slice does not hold a full hand.
pub fn interpret(
    landmarks: &[Landmark],
    width: f64,
    height: f64,
    thresholds: &GestureThresholds,
) -> Option<HandGesture> {
    if landmarks.len() < LANDMARK_COUNT {
        return None;
    }
    let wrist = &landmarks[WRIST];
    let index = &landmarks[INDEX_TIP];
    let pinch_px = pixel_distance(index, &landmarks[THUMB_TIP], width, height);
    let tips = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
    let spread_px = tips
        .iter()
        .map(|&i| pixel_distance(&landmarks[i], wrist, width, height))
        .sum::<f64>()
        / tips.len() as f64;
    Some(HandGesture {
        x: (1.0 - index.x) * width,
        y: index.y * height,
        pinching: pinch_px < thresholds.pinch_px,
        closed: spread_px < thresholds.closed_px,
        pinch_px,
        spread_px,
    })
}

/// Flips x so overlays line up with the mirrored video.
pub fn mirror(landmarks: &[Landmark]) -> Vec<Landmark> {
    landmarks
        .iter()
        .map(|l| Landmark {
            x: 1.0 - l.x,
            y: l.y,
            z: l.z,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 1000.0;
    const H: f64 = 1000.0;

    // Wrist at the bottom, all four fingertips `spread_px` straight above it,
    // thumb tip `pinch_px` to the right of the index tip.
    fn hand(pinch_px: f64, spread_px: f64) -> Vec<Landmark> {
        let mut pts = vec![Landmark { x: 0.5, y: 0.9, z: 0.0 }; LANDMARK_COUNT];
        let tip_y = 0.9 - spread_px / H;
        for i in [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP] {
            pts[i] = Landmark { x: 0.5, y: tip_y, z: 0.0 };
        }
        pts[THUMB_TIP] = Landmark {
            x: 0.5 + pinch_px / W,
            y: tip_y,
            z: 0.0,
        };
        pts
    }

    #[test]
    fn pinch_below_threshold() {
        let t = GestureThresholds::default();
        let g = interpret(&hand(35.0, 300.0), W, H, &t).expect("full hand");
        assert!(g.pinching);
        assert!((g.pinch_px - 35.0).abs() < 1e-6);
        let g = interpret(&hand(45.0, 300.0), W, H, &t).expect("full hand");
        assert!(!g.pinching);
    }

    #[test]
    fn closed_hand_uses_mean_fingertip_distance() {
        let t = GestureThresholds::default();
        let g = interpret(&hand(60.0, 140.0), W, H, &t).expect("full hand");
        assert!((g.spread_px - 140.0).abs() < 1e-6);
        assert!(g.closed);
        let g = interpret(&hand(60.0, 160.0), W, H, &t).expect("full hand");
        assert!(!g.closed);
    }

    #[test]
    fn thresholds_are_strict() {
        // 1024-pixel frame so every coordinate below is exact in binary
        let size = 1024.0;
        let mut pts = vec![Landmark { x: 0.5, y: 0.75, z: 0.0 }; LANDMARK_COUNT];
        let tip_y = 0.75 - 150.0 / size;
        for i in [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP] {
            pts[i] = Landmark { x: 0.5, y: tip_y, z: 0.0 };
        }
        pts[THUMB_TIP] = Landmark { x: 0.5 + 40.0 / size, y: tip_y, z: 0.0 };
        let g = interpret(&pts, size, size, &GestureThresholds::default()).expect("full hand");
        assert_eq!(g.pinch_px, 40.0);
        assert_eq!(g.spread_px, 150.0);
        assert!(!g.pinching);
        assert!(!g.closed);
    }

    #[test]
    fn index_tip_is_mirrored() {
        let t = GestureThresholds::default();
        let pts = hand(60.0, 300.0);
        let g = interpret(&pts, 640.0, 480.0, &t).expect("full hand");
        assert!((g.x - (1.0 - pts[INDEX_TIP].x) * 640.0).abs() < 1e-9);
        assert!((g.y - pts[INDEX_TIP].y * 480.0).abs() < 1e-9);
    }

    #[test]
    fn distances_scale_with_each_axis() {
        let mut pts = vec![Landmark::default(); LANDMARK_COUNT];
        pts[THUMB_TIP] = Landmark { x: 0.1, y: 0.0, z: 0.0 };
        pts[INDEX_TIP] = Landmark { x: 0.0, y: 0.1, z: 0.0 };
        let g = interpret(&pts, 300.0, 400.0, &GestureThresholds::default()).expect("full hand");
        // (30, 40) -> 50
        assert!((g.pinch_px - 50.0).abs() < 1e-9);
    }

    #[test]
    fn partial_hand_is_ignored() {
        let pts = vec![Landmark::default(); 20];
        assert!(interpret(&pts, W, H, &GestureThresholds::default()).is_none());
    }

    #[test]
    fn mirror_flips_x_only() {
        let out = mirror(&[Landmark { x: 0.25, y: 0.4, z: -0.1 }]);
        assert_eq!(out, vec![Landmark { x: 0.75, y: 0.4, z: -0.1 }]);
    }
}
