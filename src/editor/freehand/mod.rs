//! Freehand strokes with optional snap-to-road.
//!
//! A stroke is captured at full pointer resolution. On release it is either
//! committed as drawn or sent to the routing service first; a failed snap
//! commits the raw stroke.

mod capture;
mod snap;
mod systems;


pub use capture::{CapturePhase, FreehandCapture};
pub use snap::RoutingBackend;
pub use systems::{handle_freehand, poll_snap_tasks, sync_routing_backend};
