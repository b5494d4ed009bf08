//! Timeline engine for tzclock.
//!
//! ```text
//!   zone ids ─┐
//!   scroll   ─┼─▶ reference instant ─▶ compute_rows (per column) ─▶ render_timeline ─▶ RenderCommand[]
//!   viewport ─┘                          (model::rows)               (views::timeline)
//! ```

pub mod logging;
pub mod model;
pub mod scroll;
pub mod settings;
pub mod svg;
pub mod text;
pub mod view;
pub mod views;

pub use model::{Background, RowDescriptor, compute_rows, reference_instant, resolve_zone};
pub use scroll::ScrollState;
pub use settings::Settings;
pub use view::{Drawable, Scrollable, TimelineView};
