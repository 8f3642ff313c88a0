//! Bindings to the external hand-landmark model.
//!
//! The model runs in JS; results cross the boundary as a JSON array of hands,
//! each an array of `{x, y, z}` points normalized to the video frame.

use wasm_bindgen::prelude::*;
use web_sys::HtmlVideoElement;

use crate::config::DemoConfig;
use crate::error::{DemoError, describe_js};
use crate::gesture::Landmark;

#[wasm_bindgen(module = "/js/landmarker.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = createHandLandmarker)]
    async fn create_hand_landmarker(
        wasm_base: &str,
        model_url: &str,
        num_hands: u32,
        use_gpu: bool,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = detectHands)]
    fn detect_hands(
        landmarker: &JsValue,
        video: &HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<String, JsValue>;
}

pub type Hands = Vec<Vec<Landmark>>;

pub struct HandLandmarker {
    inner: JsValue,
}

impl HandLandmarker {
    pub async fn load(cfg: &DemoConfig) -> Result<Self, DemoError> {
        let inner = create_hand_landmarker(
            &cfg.wasm_base_url,
            &cfg.model_asset_url,
            cfg.num_hands,
            cfg.use_gpu,
        )
        .await
        .map_err(|e| DemoError::Model(describe_js(&e)))?;
        Ok(Self { inner })
    }

    pub fn detect(&self, video: &HtmlVideoElement, timestamp_ms: f64) -> Result<Hands, DemoError> {
        let raw = detect_hands(&self.inner, video, timestamp_ms)?;
        Ok(parse_hands(&raw)?)
    }
}

pub fn parse_hands(raw: &str) -> Result<Hands, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_landmarker_output() {
        let raw = r#"[[{"x":0.1,"y":0.2,"z":-0.01},{"x":0.3,"y":0.4,"z":0.0}],[]]"#;
        let hands = parse_hands(raw).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0][1], Landmark { x: 0.3, y: 0.4, z: 0.0 });
        assert!(hands[1].is_empty());
    }

    #[test]
    fn missing_depth_defaults_to_zero() {
        let hands = parse_hands(r#"[[{"x":0.5,"y":0.5}]]"#).unwrap();
        assert_eq!(hands[0][0].z, 0.0);
    }

    #[test]
    fn no_hands_is_empty() {
        assert!(parse_hands("[]").unwrap().is_empty());
        assert!(parse_hands("{").is_err());
    }
}
