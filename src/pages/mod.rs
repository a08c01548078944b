//! Pages
//!
//! Top-level page components for each route.

pub mod admin;
pub mod dashboard;

pub use admin::Admin;
pub use dashboard::Dashboard;
