//! Undo/Redo history for geometry edits.
//!
//! Every geometry mutation goes through [`EditContext::commit`], which
//! snapshots the target before changing it. Group geometry and the extra
//! annotation buffer share one pair of stacks; each entry carries the target
//! it was taken from so undo and redo always restore the right one.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last edit
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone edit
//!
//! ## Module Structure
//!
//! - [`command_history`] - CommandHistory resource and snapshot types
//! - [`commit`] - The recording boundary used by every editing tool
//! - [`systems`] - Keyboard shortcuts and toolbar requests

mod command_history;
pub(crate) mod commit;
mod systems;

#[cfg(test)]
mod tests;

pub use command_history::{CommandHistory, HistoryTarget};
pub use commit::{Edit, EditContext};
pub use systems::{handle_history_requests, handle_history_shortcuts, HistoryRequest};

/// Maximum number of snapshots to keep in history
pub(crate) const MAX_HISTORY_SIZE: usize = 100;
