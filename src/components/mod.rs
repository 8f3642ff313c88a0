pub mod app;
pub mod score_panel;
pub mod status_overlay;

pub use app::App;
