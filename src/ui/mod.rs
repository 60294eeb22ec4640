//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* page state and turns it into cells on the
//! terminal.  It also owns the page geometry, since column widths only exist
//! once there is a terminal to measure.

pub mod chrome;
pub mod layout;
pub mod page;
pub mod smooth_scroll;
pub mod theme;
