//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* results (a label frame per label) and the
//! document layout and turns them into cells on the terminal.  Nothing here
//! computes selection or progress.

pub mod document_view;
pub mod label;
pub mod layout;
pub mod smooth_scroll;
pub mod theme;
