//! State Management
//!
//! Global view model and snapshot polling.

pub mod global;
pub mod poll;
