//! Snapshot Polling
//!
//! Periodic re-fetch of the full table/reservation snapshot. Each successful
//! fetch replaces the previous snapshot wholesale; a failed fetch leaves it
//! untouched, so the view stays stale-but-consistent until the next tick or
//! a user-triggered refresh.

use leptos::*;

use super::global::GlobalState;
use crate::api;

/// Snapshot poll period, per the product's refresh cadence
pub const POLL_INTERVAL_MS: u32 = 60_000;

/// Fetch the snapshot once and replace the view model's table state.
///
/// On failure the previous snapshot and `last_refresh` stamp are kept. A
/// failed first load has no stale snapshot to stand in for it, so that one
/// is surfaced as an error toast; later background failures only go to the
/// console so a transient backend hiccup does not toast over whatever the
/// user is doing. Mutation paths surface their own errors.
pub async fn refresh_snapshot(state: &GlobalState) {
    match api::fetch_tables().await {
        Ok(tables) => {
            state.tables.set(tables);
            state
                .last_refresh
                .set(Some(chrono::Local::now().timestamp_millis()));
        }
        Err(e) => {
            web_sys::console::error_1(&format!("快照刷新失败: {}", e).into());
            if state.last_refresh.get_untracked().is_none() {
                state.show_error(&e);
            }
        }
    }
}

/// Start polling: one immediate fetch, then a fixed interval. New polls are
/// never coalesced with in-flight user mutations; the last completed fetch
/// wins.
pub fn init_polling(state: GlobalState) {
    let initial = state.clone();
    spawn_local(async move {
        initial.loading.set(true);
        refresh_snapshot(&initial).await;
        initial.loading.set(false);
    });

    gloo_timers::callback::Interval::new(POLL_INTERVAL_MS, move || {
        let state = state.clone();
        spawn_local(async move {
            refresh_snapshot(&state).await;
        });
    })
    .forget();
}
