use serde::{Deserialize, Serialize};

use crate::gesture::GestureThresholds;
use crate::model::{RectSpec, RectangleManager, SCORE_INCREMENT, ScoreState};
use crate::util::cwarn;

pub const STORAGE_KEY: &str = "pd_config";

/// tasks-vision release the JS bundle in `js/landmarker.js` is pinned to.
/// The wasm runtime must come from the same release.
pub const TASKS_VISION_VERSION: &str = "0.10.14";

/// Everything the page needs to start the demo. Fields missing from a stored
/// override keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub video_id: String,
    pub canvas_id: String,
    pub camera_width: u32,
    pub camera_height: u32,
    pub thresholds: GestureThresholds,
    pub score_increment: u32,
    pub rectangles: Vec<RectSpec>,
    /// Base URL of the landmarker's wasm runtime files.
    pub wasm_base_url: String,
    pub model_asset_url: String,
    pub num_hands: u32,
    pub use_gpu: bool,
    pub debug_log: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            video_id: "video".to_string(),
            canvas_id: "canvas".to_string(),
            camera_width: 1280,
            camera_height: 720,
            thresholds: GestureThresholds::default(),
            score_increment: SCORE_INCREMENT,
            rectangles: default_board(),
            wasm_base_url: format!(
                "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@{}/wasm",
                TASKS_VISION_VERSION
            ),
            model_asset_url: "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/1/hand_landmarker.task".to_string(),
            num_hands: 2,
            use_gpu: true,
            debug_log: false,
        }
    }
}

/// Four squares stacked down the left half of the canvas.
pub fn default_board() -> Vec<RectSpec> {
    vec![
        RectSpec::new(50.0, 50.0, 120.0, 120.0, "#4CAF50"),
        RectSpec::new(50.0, 200.0, 120.0, 120.0, "#2196F3"),
        RectSpec::new(50.0, 350.0, 120.0, 120.0, "#FF9800"),
        RectSpec::new(50.0, 500.0, 120.0, 120.0, "#E91E63"),
    ]
}

impl DemoConfig {
    /// Parses a stored override; anything unreadable falls back to defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                cwarn(&format!("ignoring stored config: {}", e));
                Self::default()
            }
        }
    }

    /// Fresh board for this configuration. The midline starts at the
    /// requested camera width and is corrected once the real frame size is known.
    pub fn build_board(&self) -> RectangleManager {
        let mut board = RectangleManager::with_score(
            self.camera_width as f64,
            ScoreState::with_increment(self.score_increment),
        );
        for r in &self.rectangles {
            board.add_rectangle(r.x, r.y, r.width, r.height, &r.color);
        }
        board
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_board() {
        let cfg = DemoConfig::default();
        assert_eq!(cfg.rectangles.len(), 4);
        assert_eq!(cfg.rectangles[3].y, 500.0);
        assert_eq!(cfg.thresholds.pinch_px, 40.0);
        assert_eq!(cfg.thresholds.closed_px, 150.0);
        assert_eq!(cfg.score_increment, 25);
        assert_eq!((cfg.camera_width, cfg.camera_height), (1280, 720));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = DemoConfig::from_json(r#"{"thresholds":{"pinch_px":30.0,"closed_px":150.0},"debug_log":true}"#);
        assert_eq!(cfg.thresholds.pinch_px, 30.0);
        assert!(cfg.debug_log);
        assert_eq!(cfg.rectangles, default_board());
        assert_eq!(cfg.video_id, "video");
    }

    #[test]
    fn board_uses_configured_increment() {
        let cfg = DemoConfig::from_json(r#"{"score_increment":10}"#);
        let mut board = cfg.build_board();
        assert_eq!(board.rectangles().len(), 4);
        assert_eq!(board.canvas_width(), 1280.0);
        board.pointer_down(110.0, 110.0);
        board.pointer_move(900.0, 110.0);
        board.pointer_up();
        assert_eq!(board.score(), 10);
    }

    #[test]
    fn wasm_runtime_matches_the_bundled_loader() {
        let pinned = format!("tasks-vision@{}/", TASKS_VISION_VERSION);
        assert!(include_str!("../js/landmarker.js").contains(&pinned));
        assert!(DemoConfig::default().wasm_base_url.contains(&pinned));
    }

    #[test]
    fn custom_board_round_trips() {
        let mut cfg = DemoConfig::default();
        cfg.rectangles = vec![RectSpec::new(1.0, 2.0, 3.0, 4.0, "#123456")];
        let raw = serde_json::to_string(&cfg).unwrap();
        assert_eq!(DemoConfig::from_json(&raw), cfg);
    }
}
