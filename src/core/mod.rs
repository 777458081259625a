//! Core algorithms – section geometry, active-section selection and the
//! progress-to-offset mapping.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The
//! presentation layer hands in a [`geometry::SectionSource`] and a viewport,
//! and gets plain values back.

pub mod animator;
pub mod geometry;
pub mod mapping;
pub mod selection;
