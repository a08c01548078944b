//! API Layer
//!
//! HTTP client for the reservation backend.

pub mod client;

pub use client::*;
