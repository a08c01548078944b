//! Reservation Detail Modal
//!
//! Per-table detail view: the reservation list in display order plus forms
//! for creating and editing reservations and actions for marking arrival or
//! cancelling. Every successful mutation re-fetches the snapshot; nothing is
//! mutated locally.

use leptos::*;

use crate::api;
use crate::components::confirm;
use crate::schedule;
use crate::state::global::{GlobalState, Reservation, Table};
use crate::state::poll::refresh_snapshot;

/// Reservation detail modal, shown while a table is selected.
///
/// The table is looked up in the snapshot on every render, so a background
/// poll landing while the modal is open refreshes its contents in place. A
/// table deleted out from under the modal simply closes it.
#[component]
pub fn ReservationModal() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        {move || {
            state
                .selected_table
                .get()
                .and_then(|id| state.table_by_id(&id))
                .map(|table| view! { <ModalBody table=table /> })
        }}
    }
}

#[derive(Clone, PartialEq)]
enum ModalMode {
    List,
    Create,
    Edit(Reservation),
}

#[component]
fn ModalBody(table: Table) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (mode, set_mode) = create_signal(ModalMode::List);

    let close = {
        let state = state.clone();
        move |_| state.selected_table.set(None)
    };

    let table_for_form = table.clone();
    let ordered = schedule::display_order(&table.reservations);

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
            <div class="bg-gray-800 rounded-xl p-6 w-full max-w-2xl mx-4 max-h-[85vh] overflow-y-auto">
                // Header
                <div class="flex items-center justify-between mb-6">
                    <div>
                        <h2 class="text-xl font-semibold">{table.name.clone()}</h2>
                        <p class="text-gray-400 text-sm mt-1">
                            {format!("{} · {}座", table.floor, table.seats)}
                        </p>
                    </div>
                    <button on:click=close class="text-gray-400 hover:text-white">
                        "✕"
                    </button>
                </div>

                {move || {
                    match mode.get() {
                        ModalMode::List => {
                            let ordered = ordered.clone();
                            view! {
                                <div class="space-y-4">
                                    <button
                                        on:click=move |_| set_mode.set(ModalMode::Create)
                                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                                    >
                                        "+ 新增预定"
                                    </button>

                                    <ReservationList
                                        reservations=ordered
                                        on_edit=move |res| set_mode.set(ModalMode::Edit(res))
                                    />
                                </div>
                            }.into_view()
                        }
                        ModalMode::Create => view! {
                            <ReservationForm
                                table_id=table_for_form.id.clone()
                                existing=None
                                on_done=move || set_mode.set(ModalMode::List)
                            />
                        }.into_view(),
                        ModalMode::Edit(res) => view! {
                            <ReservationForm
                                table_id=table_for_form.id.clone()
                                existing=Some(res)
                                on_done=move || set_mode.set(ModalMode::List)
                            />
                        }.into_view(),
                    }
                }}
            </div>
        </div>
    }
}

/// Reservation list in display order with status badges and row actions
#[component]
fn ReservationList(
    reservations: Vec<Reservation>,
    on_edit: impl Fn(Reservation) + Clone + 'static,
) -> impl IntoView {
    if reservations.is_empty() {
        return view! {
            <p class="text-gray-400 text-sm py-8 text-center">"该桌暂无预定记录"</p>
        }.into_view();
    }

    reservations
        .into_iter()
        .map(|res| {
            let on_edit = on_edit.clone();
            view! { <ReservationRow reservation=res on_edit=on_edit /> }
        })
        .collect_view()
}

#[component]
fn ReservationRow(
    reservation: Reservation,
    on_edit: impl Fn(Reservation) + Clone + 'static,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (busy, set_busy) = create_signal(false);

    let is_active = reservation.status.is_active();
    let status_label = reservation.status.label();
    let when = schedule::parse_start(&reservation.start_time)
        .map(|start| start.format("%m-%d %H:%M").to_string())
        .unwrap_or_else(|| reservation.start_time.clone());

    let res_for_edit = reservation.clone();
    let edit = move |_| on_edit(res_for_edit.clone());

    let state_for_arrive = state.clone();
    let arrive_id = reservation.id.clone();
    let arrive = move |_| {
        set_busy.set(true);
        let state = state_for_arrive.clone();
        let id = arrive_id.clone();
        spawn_local(async move {
            match api::mark_arrived(&id).await {
                Ok(_) => {
                    state.show_success("客人已到店");
                    refresh_snapshot(&state).await;
                }
                Err(e) => state.show_error(&e),
            }
            set_busy.set(false);
        });
    };

    let state_for_cancel = state.clone();
    let cancel_id = reservation.id.clone();
    let cancel = move |_| {
        if !confirm("确定取消该预定吗？") {
            return;
        }
        set_busy.set(true);
        let state = state_for_cancel.clone();
        let id = cancel_id.clone();
        spawn_local(async move {
            match api::cancel_reservation(&id).await {
                Ok(()) => {
                    state.show_success("预定已取消");
                    refresh_snapshot(&state).await;
                }
                Err(e) => state.show_error(&e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="bg-gray-700/60 rounded-lg p-4 border border-gray-600">
            <div class="flex items-start justify-between">
                <div>
                    <div class="flex items-center space-x-2">
                        <span class="font-semibold">{reservation.guest_name.clone()}</span>
                        <span class="text-gray-400 text-sm">
                            {format!("{}人", reservation.party_size)}
                        </span>
                        <span class=format!(
                            "text-xs px-2 py-0.5 rounded-full {}",
                            if is_active { "bg-blue-600" } else { "bg-gray-600" }
                        )>
                            {status_label}
                        </span>
                    </div>
                    <div class="text-gray-300 text-sm mt-1">{when}</div>
                    <div class="text-gray-400 text-sm mt-1">{reservation.phone.clone()}</div>
                    {(!reservation.notes.is_empty()).then(|| view! {
                        <div class="text-gray-400 text-sm mt-1">
                            {format!("备注: {}", reservation.notes)}
                        </div>
                    })}
                </div>

                // Only active reservations can be acted on
                {is_active.then(|| view! {
                    <div class="flex items-center space-x-2">
                        <button
                            on:click=arrive.clone()
                            disabled=move || busy.get()
                            class="px-3 py-1.5 bg-green-600 hover:bg-green-700 disabled:bg-gray-600 rounded-lg text-sm transition-colors"
                        >
                            "到店"
                        </button>
                        <button
                            on:click=edit.clone()
                            class="px-3 py-1.5 bg-gray-600 hover:bg-gray-500 rounded-lg text-sm transition-colors"
                        >
                            "修改"
                        </button>
                        <button
                            on:click=cancel.clone()
                            disabled=move || busy.get()
                            class="px-3 py-1.5 bg-red-600 hover:bg-red-700 disabled:bg-gray-600 rounded-lg text-sm transition-colors"
                        >
                            "取消"
                        </button>
                    </div>
                })}
            </div>
        </div>
    }
}

/// Create / edit form. The default start suggestion rounds up to the next
/// quarter hour; whatever is submitted gets its minute aligned down to a
/// quarter boundary first.
#[component]
fn ReservationForm(
    table_id: String,
    existing: Option<Reservation>,
    on_done: impl Fn() + Clone + 'static,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let editing = existing.is_some();
    let default_start = schedule::format_start(schedule::next_quarter_hour(
        chrono::Local::now().naive_local(),
    ));

    let (guest, set_guest) = create_signal(
        existing.as_ref().map(|r| r.guest_name.clone()).unwrap_or_default(),
    );
    let (phone, set_phone) = create_signal(
        existing.as_ref().map(|r| r.phone.clone()).unwrap_or_default(),
    );
    let (party, set_party) = create_signal(
        existing.as_ref().map(|r| r.party_size.to_string()).unwrap_or_else(|| "2".to_string()),
    );
    let (start, set_start) = create_signal(
        existing.as_ref().map(|r| r.start_time.clone()).unwrap_or(default_start),
    );
    let (notes, set_notes) = create_signal(
        existing.as_ref().map(|r| r.notes.clone()).unwrap_or_default(),
    );
    let (submitting, set_submitting) = create_signal(false);

    let reservation_id = existing.map(|r| r.id);
    let on_done_for_submit = on_done.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let guest_name = guest.get().trim().to_string();
        if guest_name.is_empty() {
            state.show_error("客人姓名不能为空");
            return;
        }

        let phone_number = phone.get().trim().to_string();
        if phone_number.is_empty() {
            state.show_error("手机号不能为空");
            return;
        }

        let party_size = match party.get().trim().parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                state.show_error("预定人数必须大于0");
                return;
            }
        };

        let Some(start_at) = schedule::parse_start(&start.get()) else {
            state.show_error("预定时间格式无效");
            return;
        };
        let start_time = schedule::format_start(schedule::align_quarter_down(start_at));

        set_submitting.set(true);

        let state_clone = state.clone();
        let table_id = table_id.clone();
        let reservation_id = reservation_id.clone();
        let notes_text = notes.get().trim().to_string();
        let on_done_inner = on_done_for_submit.clone();
        spawn_local(async move {
            let result = match reservation_id {
                Some(id) => api::update_reservation(
                    &id,
                    &api::ReservationUpdate {
                        start_time,
                        guest_name,
                        phone: phone_number,
                        party_size,
                        notes: notes_text,
                    },
                )
                .await
                .map(|_| "预定已更新"),
                None => api::create_reservation(&api::NewReservation {
                    table_id,
                    start_time,
                    guest_name,
                    phone: phone_number,
                    party_size,
                    notes: notes_text,
                })
                .await
                .map(|_| "预定已创建"),
            };

            match result {
                Ok(message) => {
                    state_clone.show_success(message);
                    refresh_snapshot(&state_clone).await;
                    on_done_inner();
                }
                Err(e) => state_clone.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <h3 class="font-semibold">
                {if editing { "修改预定" } else { "新增预定" }}
            </h3>

            // Guest name
            <div>
                <label class="block text-sm text-gray-400 mb-2">"客人姓名"</label>
                <input
                    type="text"
                    prop:value=move || guest.get()
                    on:input=move |ev| set_guest.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            // Phone
            <div>
                <label class="block text-sm text-gray-400 mb-2">"手机号"</label>
                <input
                    type="tel"
                    prop:value=move || phone.get()
                    on:input=move |ev| set_phone.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            // Party size
            <div>
                <label class="block text-sm text-gray-400 mb-2">"预定人数"</label>
                <input
                    type="number"
                    min="1"
                    prop:value=move || party.get()
                    on:input=move |ev| set_party.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            // Start time
            <div>
                <label class="block text-sm text-gray-400 mb-2">"预定时间"</label>
                <input
                    type="datetime-local"
                    step="900"
                    prop:value=move || start.get()
                    on:input=move |ev| set_start.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            // Notes
            <div>
                <label class="block text-sm text-gray-400 mb-2">"备注"</label>
                <textarea
                    prop:value=move || notes.get()
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 h-20
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            // Buttons
            <div class="flex space-x-3 pt-2">
                <button
                    type="button"
                    on:click=move |_| on_done()
                    class="flex-1 px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                >
                    "返回"
                </button>
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="flex-1 px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || {
                        if submitting.get() {
                            "提交中..."
                        } else if editing {
                            "保存修改"
                        } else {
                            "创建预定"
                        }
                    }}
                </button>
            </div>
        </form>
    }
}
