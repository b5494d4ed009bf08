pub mod rows;
pub mod zone;

pub use rows::{
    Background, HEADER_HEIGHT, HOUR_HEIGHT, LOOK_BACK_SECS, MAX_ROWS, RowDescriptor, Rows, compute_rows,
    reference_instant,
};
pub use zone::{ResolvedZone, ZoneError, parse_zone, resolve_zone};
