mod app;
mod renderer;
mod theme;

pub use app::TzClockApp;
pub use renderer::render_commands;
