// Drawing surface abstraction plus the per-frame scene helpers.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlVideoElement};

use crate::gesture::{HAND_CONNECTIONS, HandGesture, Landmark};

/// The subset of 2D drawing calls the board and overlays need.
pub trait Surface {
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_font(&mut self, font: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn stroke_text(&mut self, text: &str, x: f64, y: f64);
}

impl Surface for CanvasRenderingContext2d {
    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }
    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }
    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }
    fn set_line_dash(&mut self, segments: &[f64]) {
        let arr = js_sys::Array::new();
        for s in segments {
            arr.push(&JsValue::from_f64(*s));
        }
        CanvasRenderingContext2d::set_line_dash(self, &arr).ok();
    }
    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
    }
    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.begin_path();
        self.move_to(x0, y0);
        self.line_to(x1, y1);
        self.stroke();
    }
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0).ok();
        self.fill();
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        CanvasRenderingContext2d::fill_text(self, text, x, y).ok();
    }
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        CanvasRenderingContext2d::stroke_text(self, text, x, y).ok();
    }
}

/// Clears the canvas and paints the camera frame flipped horizontally so the
/// user sees a mirror image.
pub fn draw_mirrored_video(
    ctx: &CanvasRenderingContext2d,
    video: &HtmlVideoElement,
    w: f64,
    h: f64,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.translate(w, 0.0)?;
    ctx.scale(-1.0, 1.0)?;
    let drawn = ctx.draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, w, h);
    ctx.restore();
    drawn
}

/// Index tip marker plus the debug readout shown while pinching.
pub fn draw_gesture_feedback<S: Surface + ?Sized>(s: &mut S, g: &HandGesture) {
    if g.pinching {
        s.set_fill_style("#FFFFFF");
        s.set_font("16px Arial");
        let state = if g.closed { "closed" } else { "open" };
        s.fill_text(
            &format!("dist: {:.0}px {}", g.spread_px, state),
            10.0,
            30.0,
        );
    }
    s.set_fill_style(if g.pinching { "#FF0000" } else { "#00FF00" });
    s.fill_circle(g.x, g.y, 10.0);
}

/// Connectors and joints for one hand. `landmarks` must already be mirrored.
pub fn draw_hand_skeleton<S: Surface + ?Sized>(s: &mut S, landmarks: &[Landmark], w: f64, h: f64) {
    s.set_stroke_style("#00FF00");
    s.set_line_width(5.0);
    for (a, b) in HAND_CONNECTIONS {
        if let (Some(p), Some(q)) = (landmarks.get(a), landmarks.get(b)) {
            s.line(p.x * w, p.y * h, q.x * w, q.y * h);
        }
    }
    s.set_fill_style("#FF0000");
    for p in landmarks {
        s.fill_circle(p.x * w, p.y * h, 3.0);
    }
}

#[cfg(test)]
pub mod recording {
    use super::Surface;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Fill(String),
        Stroke(String),
        LineWidth(f64),
        Dash(Vec<f64>),
        Font(String),
        FillRect(f64, f64, f64, f64),
        StrokeRect(f64, f64, f64, f64),
        Line(f64, f64, f64, f64),
        Circle(f64, f64, f64),
        FillText(String, f64, f64),
        StrokeText(String, f64, f64),
    }

    /// Records every call so tests can assert on what was drawn.
    #[derive(Default, Debug)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn fill_rects(&self) -> Vec<(f64, f64, f64, f64)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::FillRect(x, y, w, h) => Some((*x, *y, *w, *h)),
                    _ => None,
                })
                .collect()
        }

        pub fn lines(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Line(..))).count()
        }

        pub fn texts(&self) -> Vec<String> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::FillText(t, ..) => Some(t.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn set_fill_style(&mut self, color: &str) {
            self.ops.push(Op::Fill(color.to_string()));
        }
        fn set_stroke_style(&mut self, color: &str) {
            self.ops.push(Op::Stroke(color.to_string()));
        }
        fn set_line_width(&mut self, width: f64) {
            self.ops.push(Op::LineWidth(width));
        }
        fn set_line_dash(&mut self, segments: &[f64]) {
            self.ops.push(Op::Dash(segments.to_vec()));
        }
        fn set_font(&mut self, font: &str) {
            self.ops.push(Op::Font(font.to_string()));
        }
        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::FillRect(x, y, w, h));
        }
        fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::StrokeRect(x, y, w, h));
        }
        fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
            self.ops.push(Op::Line(x0, y0, x1, y1));
        }
        fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
            self.ops.push(Op::Circle(x, y, radius));
        }
        fn fill_text(&mut self, text: &str, x: f64, y: f64) {
            self.ops.push(Op::FillText(text.to_string(), x, y));
        }
        fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
            self.ops.push(Op::StrokeText(text.to_string(), x, y));
        }
    }
}
