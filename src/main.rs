mod camera;
mod components;
mod config;
mod draw;
mod error;
mod frame_loop;
mod gesture;
mod landmarker;
mod model;
mod pointer;
mod util;

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<components::App>::new().render();
}
