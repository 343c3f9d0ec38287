mod actions;
mod app;
mod events;
mod mouse;

pub use app::App;
