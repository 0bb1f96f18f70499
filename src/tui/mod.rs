mod app;
mod editor;

pub use app::App;
