use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlVideoElement};
use yew::prelude::*;

use super::score_panel::ScorePanel;
use super::status_overlay::{Status, StatusOverlay};
use crate::camera::{Camera, keep_while_alive, release_slot, start_camera};
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::frame_loop::{RafLoop, Scene};
use crate::landmarker::HandLandmarker;
use crate::model::RectangleManager;
use crate::pointer::PointerListeners;
use crate::util::{cerror, clog, cwarn, set_debug_log};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct ScoreView {
    score: u32,
    moved: usize,
}

impl ScoreView {
    fn of(board: &RectangleManager) -> Self {
        Self {
            score: board.score(),
            moved: board.scored_count(),
        }
    }
}

/// Camera, model, then the frame loop. The camera and the loop are parked in
/// `camera_slot` and `raf_slot` so the component can stop them on unmount.
async fn start_demo(
    cfg: Rc<DemoConfig>,
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    board: Rc<RefCell<RectangleManager>>,
    camera_slot: Rc<RefCell<Option<Camera>>>,
    raf_slot: Rc<RefCell<Option<RafLoop>>>,
    alive: Rc<Cell<bool>>,
    score_view: UseStateHandle<ScoreView>,
) -> Result<(), DemoError> {
    let window = web_sys::window().ok_or(DemoError::MissingGlobal("window"))?;
    let performance = window
        .performance()
        .ok_or(DemoError::MissingGlobal("performance"))?;

    video.set_muted(true);
    let camera = start_camera(&video, cfg.camera_width, cfg.camera_height).await?;
    let (w, h) = (camera.width, camera.height);
    if !keep_while_alive(&alive, &camera_slot, camera) {
        return Ok(());
    }
    canvas.set_width(w);
    canvas.set_height(h);
    board.borrow_mut().set_canvas_width(w as f64);
    clog(&format!("camera ready {}x{}", w, h));

    let landmarker = HandLandmarker::load(&cfg).await?;
    clog("hand landmarker ready");
    if !alive.get() {
        return Ok(());
    }

    let mut scene = Scene::new(video, canvas, board.clone(), landmarker, cfg.thresholds)?;
    let last = Cell::new(ScoreView::of(&board.borrow()));
    let mut failing = false;
    let raf = RafLoop::start(window, move || {
        match scene.tick(performance.now()) {
            Ok(_) => failing = false,
            Err(e) => {
                if !failing {
                    cwarn(&format!("frame skipped: {}", e));
                }
                failing = true;
            }
        }
        // pointer releases score between frames too, so sync every tick
        let now = ScoreView::of(&board.borrow());
        if now != last.get() {
            clog(&format!("score: {} -> {}", last.get().score, now.score));
            last.set(now);
            score_view.set(now);
        }
    });
    *raf_slot.borrow_mut() = Some(raf);
    Ok(())
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| {
        let cfg = DemoConfig::load();
        set_debug_log(cfg.debug_log);
        cfg
    });
    let video_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let board = {
        let cfg = config.clone();
        use_mut_ref(move || cfg.build_board())
    };
    let camera_slot = use_mut_ref(|| None::<Camera>);
    let raf_slot = use_mut_ref(|| None::<RafLoop>);
    let status = use_state(|| Status::Starting);
    let score_view = use_state(ScoreView::default);
    let total = board.borrow().rectangles().len();

    // Mount: pointer listeners right away, camera + model asynchronously
    {
        let cfg = config.clone();
        let video_ref = video_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let board = board.clone();
        let camera_slot = camera_slot.clone();
        let raf_slot = raf_slot.clone();
        let status = status.clone();
        let score_view = score_view.clone();
        use_effect_with((), move |_| {
            let alive = Rc::new(Cell::new(true));
            let raf_cleanup = raf_slot.clone();
            let camera_cleanup = camera_slot.clone();
            let elements = (
                web_sys::window(),
                video_ref.cast::<HtmlVideoElement>(),
                canvas_ref.cast::<HtmlCanvasElement>(),
            );
            let mut listeners = None;
            match elements {
                (Some(window), Some(video), Some(canvas)) => {
                    match PointerListeners::attach(&window, &canvas, board.clone()) {
                        Ok(l) => listeners = Some(l),
                        Err(e) => cwarn(&format!("mouse input disabled: {}", e)),
                    }
                    let alive = alive.clone();
                    spawn_local(async move {
                        let started = start_demo(
                            cfg,
                            video,
                            canvas,
                            board,
                            camera_slot,
                            raf_slot,
                            alive.clone(),
                            score_view,
                        )
                        .await;
                        if !alive.get() {
                            return;
                        }
                        match started {
                            Ok(()) => status.set(Status::Running),
                            Err(e) => {
                                cerror(&format!("demo failed to start: {}", e));
                                status.set(Status::Failed(e.to_string()));
                            }
                        }
                    });
                }
                (None, ..) => status.set(Status::Failed(
                    DemoError::MissingGlobal("window").to_string(),
                )),
                (_, None, _) => status.set(Status::Failed(
                    DemoError::MissingElement(cfg.video_id.clone()).to_string(),
                )),
                (_, _, None) => status.set(Status::Failed(
                    DemoError::MissingElement(cfg.canvas_id.clone()).to_string(),
                )),
            }
            move || {
                alive.set(false);
                drop(listeners);
                if let Some(raf) = raf_cleanup.borrow_mut().take() {
                    raf.stop();
                }
                release_slot(&camera_cleanup);
            }
        });
    }

    html! {
        <div style="position:relative; display:inline-block; background:#0e1116;">
            <video ref={video_ref} id={config.video_id.clone()} playsinline=true style="display:none;"></video>
            <canvas ref={canvas_ref} id={config.canvas_id.clone()}
                width={config.camera_width.to_string()} height={config.camera_height.to_string()}
                style="display:block; max-width:100vw; max-height:100vh;"></canvas>
            <ScorePanel score={score_view.score} moved={score_view.moved} total={total} />
            <StatusOverlay status={(*status).clone()} />
        </div>
    }
}
