use wasm_bindgen::{JsCast, JsValue};

/// Failures in the browser plumbing around the board. The board itself has no
/// failure modes: a missing hand or a miss on drag start is simply a no-op.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("no global `{0}` available")]
    MissingGlobal(&'static str),
    #[error("element `{0}` is not mounted")]
    MissingElement(String),
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("camera unavailable: {0}")]
    Camera(String),
    #[error("hand landmarker failed to load: {0}")]
    Model(String),
    #[error("landmark result could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DemoError {
    fn from(v: JsValue) -> Self {
        DemoError::Js(describe_js(&v))
    }
}

/// Best-effort text for a thrown JS value.
pub fn describe_js(v: &JsValue) -> String {
    if let Some(s) = v.as_string() {
        return s;
    }
    if let Some(e) = v.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{:?}", v)
}
