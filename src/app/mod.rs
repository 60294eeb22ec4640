//! Application orchestration — state management, event reading, and input handling.

pub mod event;
pub mod handler;
pub mod state;
