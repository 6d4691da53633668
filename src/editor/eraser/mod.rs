//! Circular eraser.
//!
//! Paths are clipped exactly at the circle boundary; rings are removed whole
//! as soon as the circle touches them. A gesture edits a working copy of the
//! active target and commits it through history once, on release.

mod clip;
mod session;
mod stroke;
mod systems;

#[cfg(test)]
mod tests;

pub use session::{EraseSession, PendingErase};
pub use systems::{finish_erase_on_release, handle_erase};
