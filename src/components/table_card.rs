//! Table Card Component
//!
//! One dashboard card per table, colored by the urgency of its next
//! reservation. Clicking opens the reservation detail modal.

use chrono::NaiveDateTime;
use leptos::*;

use crate::schedule;
use crate::state::global::{GlobalState, Table};

/// Table card component
#[component]
pub fn TableCard(table: Table) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let now = chrono::Local::now().naive_local();
    let tier = schedule::urgency(&table.reservations, now);
    let next = schedule::next_reservation(&table.reservations, now).cloned();

    let table_id = table.id.clone();
    let open_detail = move |_| {
        state.selected_table.set(Some(table_id.clone()));
    };

    view! {
        <div
            on:click=open_detail
            class=format!(
                "rounded-lg p-4 border cursor-pointer transition hover:brightness-110 {}",
                tier.card_class()
            )
        >
            // Header: table name and urgency badge
            <div class="flex items-center justify-between">
                <span class="font-semibold text-lg">{table.name.clone()}</span>
                {tier.label().map(|label| view! {
                    <span class="text-xs px-2 py-0.5 rounded-full bg-black/30">{label}</span>
                })}
            </div>

            <div class="text-gray-400 text-sm mt-1">
                {format!("{}座", table.seats)}
            </div>

            // Next reservation summary
            <div class="mt-3 text-sm">
                {match next {
                    Some(res) => {
                        let when = schedule::parse_start(&res.start_time)
                            .map(|start| format_card_time(start, now))
                            .unwrap_or_else(|| res.start_time.clone());

                        view! {
                            <div class="space-y-0.5">
                                <div class="font-medium">
                                    {format!("{} · {}人", res.guest_name, res.party_size)}
                                </div>
                                <div class="text-gray-300">{when}</div>
                            </div>
                        }.into_view()
                    }
                    None => view! {
                        <span class="text-gray-500">"暂无预定"</span>
                    }.into_view(),
                }}
            </div>
        </div>
    }
}

/// Compact start time for a card: clock only for same-day reservations,
/// month-day prefix otherwise.
fn format_card_time(start: NaiveDateTime, now: NaiveDateTime) -> String {
    if start.date() == now.date() {
        start.format("%H:%M").to_string()
    } else {
        start.format("%m-%d %H:%M").to_string()
    }
}
