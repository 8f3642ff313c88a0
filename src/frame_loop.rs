use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, Window};

use crate::draw::{draw_gesture_feedback, draw_hand_skeleton, draw_mirrored_video};
use crate::error::DemoError;
use crate::gesture::{GestureThresholds, HandGesture, interpret, mirror};
use crate::landmarker::{HandLandmarker, Hands};
use crate::model::{DragEvent, RectangleManager};
use crate::util::clog;

pub fn log_drag_event(ev: &DragEvent) {
    match ev {
        DragEvent::Began(id) => clog(&format!("drag start rect={}", id.0)),
        DragEvent::Moved(_) => {}
        DragEvent::Released { rect, awarded } => {
            clog(&format!("drag end rect={} awarded={}", rect.0, awarded))
        }
    }
}

/// Feeds the first detected hand to the board. Frames without a full hand
/// leave the board untouched.
pub fn apply_first_hand(
    board: &mut RectangleManager,
    hands: &Hands,
    width: f64,
    height: f64,
    thresholds: &GestureThresholds,
) -> Option<HandGesture> {
    let g = interpret(hands.first()?, width, height, thresholds)?;
    if let Some(ev) = board.update_hand_position(g.x, g.y, g.pinching, g.closed) {
        log_drag_event(&ev);
    }
    Some(g)
}

/// Everything one frame touches: detect, interpret, update, render.
pub struct Scene {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    board: Rc<RefCell<RectangleManager>>,
    landmarker: HandLandmarker,
    thresholds: GestureThresholds,
    last_video_time: f64,
}

impl Scene {
    pub fn new(
        video: HtmlVideoElement,
        canvas: HtmlCanvasElement,
        board: Rc<RefCell<RectangleManager>>,
        landmarker: HandLandmarker,
        thresholds: GestureThresholds,
    ) -> Result<Self, DemoError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(DemoError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DemoError::NoContext)?;
        Ok(Self {
            video,
            canvas,
            ctx,
            board,
            landmarker,
            thresholds,
            last_video_time: -1.0,
        })
    }

    /// Processes the current video frame. Returns `Ok(false)` when the video
    /// has not advanced since the previous tick.
    pub fn tick(&mut self, now_ms: f64) -> Result<bool, DemoError> {
        let t = self.video.current_time();
        if t == self.last_video_time {
            return Ok(false);
        }
        self.last_video_time = t;

        let hands = self.landmarker.detect(&self.video, now_ms)?;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        draw_mirrored_video(&self.ctx, &self.video, w, h)?;

        let mut surface = self.ctx.clone();
        {
            let mut board = self.board.borrow_mut();
            if let Some(g) = apply_first_hand(&mut board, &hands, w, h, &self.thresholds) {
                draw_gesture_feedback(&mut surface, &g);
            }
            board.draw(&mut surface);
        }
        for hand in &hands {
            draw_hand_skeleton(&mut surface, &mirror(hand), w, h);
        }
        Ok(true)
    }
}

/// `requestAnimationFrame` driver. The callback is re-armed after every frame
/// until `stop` is called or the loop is dropped.
pub struct RafLoop {
    window: Window,
    raf_id: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RafLoop {
    pub fn start(window: Window, mut frame: impl FnMut() + 'static) -> Self {
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        {
            let raf_id_loop = raf_id.clone();
            let window_loop = window.clone();
            let closure_cell_loop = closure_cell.clone();
            *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                frame();
                if let Some(cb) = closure_cell_loop.borrow().as_ref() {
                    if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        raf_id_loop.set(Some(id));
                    }
                }
            }) as Box<dyn FnMut()>));
        }
        if let Some(cb) = closure_cell.borrow().as_ref() {
            if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                raf_id.set(Some(id));
            }
        }
        Self {
            window,
            raf_id,
            closure: closure_cell,
        }
    }

    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // breaks the closure -> cell -> closure cycle
        self.closure.borrow_mut().take();
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
