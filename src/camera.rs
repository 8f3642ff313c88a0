use std::cell::{Cell, RefCell};

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::error::{DemoError, describe_js};

fn camera_err(e: JsValue) -> DemoError {
    DemoError::Camera(describe_js(&e))
}

/// Something that has to be shut down explicitly once the page is done with it.
pub trait Release {
    fn release(&self);
}

/// A running camera stream and the frame size it delivers.
pub struct Camera {
    stream: MediaStream,
    pub width: u32,
    pub height: u32,
}

impl Release for Camera {
    /// Stops every track, which turns the camera light off.
    fn release(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

/// Parks `item` in `slot` while its owner is still mounted; otherwise
/// releases it on the spot. Returns whether it was kept.
pub fn keep_while_alive<T: Release>(alive: &Cell<bool>, slot: &RefCell<Option<T>>, item: T) -> bool {
    if !alive.get() {
        item.release();
        return false;
    }
    if let Some(old) = slot.borrow_mut().replace(item) {
        old.release();
    }
    true
}

/// Releases whatever `slot` holds.
pub fn release_slot<T: Release>(slot: &RefCell<Option<T>>) {
    if let Some(item) = slot.borrow_mut().take() {
        item.release();
    }
}

/// Attaches the user's camera to `video` and waits for playback to begin.
/// The returned size is the intrinsic frame size the canvas should adopt.
pub async fn start_camera(
    video: &HtmlVideoElement,
    width: u32,
    height: u32,
) -> Result<Camera, DemoError> {
    let window = web_sys::window().ok_or(DemoError::MissingGlobal("window"))?;
    let devices = window.navigator().media_devices().map_err(camera_err)?;

    let video_constraints = Object::new();
    Reflect::set(&video_constraints, &"width".into(), &JsValue::from(width))?;
    Reflect::set(&video_constraints, &"height".into(), &JsValue::from(height))?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(camera_err)?;
    let stream: MediaStream = JsFuture::from(promise)
        .await
        .map_err(camera_err)?
        .dyn_into()
        .map_err(camera_err)?;

    video.set_src_object(Some(&stream));
    let camera = Camera {
        stream,
        width: 0,
        height: 0,
    };
    let playing = match video.play() {
        Ok(p) => JsFuture::from(p).await,
        Err(e) => Err(e),
    };
    if let Err(e) = playing {
        camera.release();
        return Err(camera_err(e));
    }
    Ok(Camera {
        width: video.video_width(),
        height: video.video_height(),
        ..camera
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    struct Counted(Rc<Cell<u32>>);

    impl Release for Counted {
        fn release(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn stream_arriving_after_unmount_is_released() {
        let released = Rc::new(Cell::new(0));
        let alive = Cell::new(false);
        let slot = RefCell::new(None);
        assert!(!keep_while_alive(&alive, &slot, Counted(released.clone())));
        assert!(slot.borrow().is_none());
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn parked_stream_is_released_by_cleanup() {
        let released = Rc::new(Cell::new(0));
        let alive = Cell::new(true);
        let slot = RefCell::new(None);
        assert!(keep_while_alive(&alive, &slot, Counted(released.clone())));
        assert_eq!(released.get(), 0);

        alive.set(false);
        release_slot(&slot);
        assert_eq!(released.get(), 1);
        assert!(slot.borrow().is_none());
        // a second cleanup has nothing left to stop
        release_slot(&slot);
        assert_eq!(released.get(), 1);
    }
}
