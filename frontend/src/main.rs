use crate::app::App;

mod api;
mod app;
mod components;

fn main() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        gloo_console::warn!(format!("console logger unavailable: {}", e));
    }
    yew::Renderer::<App>::new().render();
}
