//! UI Components
//!
//! Reusable Leptos components for the two views.

pub mod loading;
pub mod nav;
pub mod reservation_modal;
pub mod table_card;
pub mod toast;

pub use loading::CardSkeleton;
pub use nav::Nav;
pub use reservation_modal::ReservationModal;
pub use table_card::TableCard;
pub use toast::Toast;

/// Blocking confirmation dialog for destructive actions
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|window| window.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}
