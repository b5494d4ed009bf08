pub mod timeline;

pub use timeline::{ColumnLayout, background_token, render_timeline};
