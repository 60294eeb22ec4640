//! Core page-effect logic — layout cache, detection, presentation state.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Geometry
//! comes in through the [`geometry::Geometry`] trait and time is always passed
//! in explicitly, so everything here runs in plain unit tests.

pub mod controller;
pub mod detect;
pub mod footer;
pub mod geometry;
pub mod labels;
pub mod layout;
pub mod marquee;
pub mod presenter;
pub mod site;
pub mod timer;
