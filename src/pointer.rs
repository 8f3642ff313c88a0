// Native mouse listeners that drive the board alongside the hand gesture.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use crate::error::DemoError;
use crate::frame_loop::log_drag_event;
use crate::model::{DragEvent, RectangleManager};

/// `MouseEvent.button` of the main (usually left) button.
const PRIMARY_BUTTON: i16 = 0;

/// Maps a client-space point into canvas pixels, accounting for CSS scaling of
/// the canvas element.
pub fn to_surface(
    client: (f64, f64),
    origin: (f64, f64),
    css_size: (f64, f64),
    px_size: (f64, f64),
) -> (f64, f64) {
    let sx = if css_size.0 > 0.0 { px_size.0 / css_size.0 } else { 1.0 };
    let sy = if css_size.1 > 0.0 { px_size.1 / css_size.1 } else { 1.0 };
    ((client.0 - origin.0) * sx, (client.1 - origin.1) * sy)
}

/// Only the primary button starts a drag.
fn press(board: &mut RectangleManager, button: i16, x: f64, y: f64) -> Option<DragEvent> {
    if button != PRIMARY_BUTTON {
        return None;
    }
    board.pointer_down(x, y)
}

/// Only the primary button ends one; other buttons released mid-drag are ignored.
fn release(board: &mut RectangleManager, button: i16) -> Option<DragEvent> {
    if button != PRIMARY_BUTTON {
        return None;
    }
    board.pointer_up()
}

fn surface_point(canvas: &HtmlCanvasElement, e: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    to_surface(
        (e.client_x() as f64, e.client_y() as f64),
        (rect.left(), rect.top()),
        (rect.width(), rect.height()),
        (canvas.width() as f64, canvas.height() as f64),
    )
}

/// Owns the listener closures; dropping it detaches them.
pub struct PointerListeners {
    window: Window,
    canvas: HtmlCanvasElement,
    mousedown_cb: Closure<dyn FnMut(MouseEvent)>,
    mousemove_cb: Closure<dyn FnMut(MouseEvent)>,
    mouseup_cb: Closure<dyn FnMut(MouseEvent)>,
}

impl PointerListeners {
    pub fn attach(
        window: &Window,
        canvas: &HtmlCanvasElement,
        board: Rc<RefCell<RectangleManager>>,
    ) -> Result<Self, DemoError> {
        let mousedown_cb = {
            let board = board.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                let (x, y) = surface_point(&canvas, &e);
                if let Some(ev) = press(&mut board.borrow_mut(), e.button(), x, y) {
                    log_drag_event(&ev);
                }
            }) as Box<dyn FnMut(_)>)
        };
        canvas.add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())?;

        let mousemove_cb = {
            let board = board.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                let (x, y) = surface_point(&canvas, &e);
                board.borrow_mut().pointer_move(x, y);
            }) as Box<dyn FnMut(_)>)
        };
        canvas.add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())?;

        // on the window so releasing outside the canvas still ends the drag
        let mouseup_cb = Closure::wrap(Box::new(move |e: MouseEvent| {
            if let Some(ev) = release(&mut board.borrow_mut(), e.button()) {
                log_drag_event(&ev);
            }
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())?;

        Ok(Self {
            window: window.clone(),
            canvas: canvas.clone(),
            mousedown_cb,
            mousemove_cb,
            mouseup_cb,
        })
    }
}

impl Drop for PointerListeners {
    fn drop(&mut self) {
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousedown",
            self.mousedown_cb.as_ref().unchecked_ref(),
        );
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.mousemove_cb.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "mouseup",
            self.mouseup_cb.as_ref().unchecked_ref(),
        );
    }
}
