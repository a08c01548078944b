//! Floorplan Dashboard
//!
//! Restaurant table-reservation frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Floor-plan dashboard with urgency-colored table cards
//! - Per-table reservation detail: create, edit, cancel, mark arrived
//! - Table-management console (add / edit / delete tables)
//! - Periodic snapshot polling, no client-side persistence
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It is a thin client: it fetches the full table/reservation
//! snapshot over HTTP, derives all presentation state locally, and re-fetches
//! after every mutation.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod schedule;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
