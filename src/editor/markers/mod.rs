//! Point markers: tap to toggle status, drag to move.

mod drag;
mod systems;

#[cfg(test)]
mod tests;

pub use drag::MarkerDrag;
pub use systems::{handle_marker_delete, handle_marker_drag, handle_marker_place, handle_marker_press};
