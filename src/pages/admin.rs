//! Admin Page
//!
//! Table-management console: add, edit and delete tables, plus the
//! clear-all-reservations action. Mutations re-fetch the snapshot; the list
//! itself renders straight from the polled view model.

use leptos::*;

use crate::api;
use crate::components::confirm;
use crate::state::global::{GlobalState, Table};
use crate::state::poll::refresh_snapshot;

/// Table management page
#[component]
pub fn Admin() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (show_create, set_show_create) = create_signal(false);
    let (editing, set_editing) = create_signal(None::<Table>);

    let tables_signal = state.tables;

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"桌位管理"</h1>
                    <p class="text-gray-400 mt-1">"维护楼层桌位与座位数"</p>
                </div>

                <button
                    on:click=move |_| set_show_create.set(true)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "+ 新增桌位"
                </button>
            </div>

            // Create table modal
            {move || {
                if show_create.get() {
                    view! {
                        <TableFormModal
                            existing=None
                            on_close=move || set_show_create.set(false)
                        />
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            // Edit table modal
            {move || {
                editing.get().map(|table| view! {
                    <TableFormModal
                        existing=Some(table)
                        on_close=move || set_editing.set(None)
                    />
                })
            }}

            // Table list
            <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                {move || {
                    let tables = tables_signal.get();
                    if tables.is_empty() {
                        view! {
                            <div class="col-span-full text-center py-12">
                                <p class="text-gray-400">"暂无桌位，点击右上角新增"</p>
                            </div>
                        }.into_view()
                    } else {
                        tables.into_iter().map(|table| {
                            view! {
                                <TableListItem
                                    table=table
                                    on_edit=move |t| set_editing.set(Some(t))
                                />
                            }
                        }).collect_view()
                    }
                }}
            </div>

            // Danger zone
            <ClearReservations />
        </div>
    }
}

/// Single table list item with edit / delete actions
#[component]
fn TableListItem(
    table: Table,
    on_edit: impl Fn(Table) + Clone + 'static,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (deleting, set_deleting) = create_signal(false);

    let active_count = table
        .reservations
        .iter()
        .filter(|r| r.status.is_active())
        .count();

    let table_for_edit = table.clone();
    let edit = move |_| on_edit(table_for_edit.clone());

    let state_for_delete = state.clone();
    let delete_id = table.id.clone();
    let delete = move |_| {
        if !confirm("确定删除该桌位吗？删除后其预定也会一并移除") {
            return;
        }
        set_deleting.set(true);
        let state = state_for_delete.clone();
        let id = delete_id.clone();
        spawn_local(async move {
            match api::delete_table(&id).await {
                Ok(()) => {
                    state.show_success("桌位已删除");
                    refresh_snapshot(&state).await;
                }
                Err(e) => state.show_error(&e),
            }
            set_deleting.set(false);
        });
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-4 border border-gray-700 hover:border-gray-600 transition-colors">
            <div class="flex items-start justify-between">
                <div>
                    <div class="flex items-center space-x-2">
                        <h3 class="font-semibold">{table.name.clone()}</h3>
                        <span class="bg-gray-600 text-xs px-2 py-0.5 rounded-full text-white">
                            {table.floor.clone()}
                        </span>
                    </div>
                    <p class="text-gray-400 text-sm mt-1">
                        {format!("{}座 · {}条有效预定", table.seats, active_count)}
                    </p>
                </div>

                <div class="flex items-center space-x-2">
                    <button
                        on:click=edit
                        class="px-3 py-1.5 bg-gray-600 hover:bg-gray-500 rounded-lg text-sm transition-colors"
                    >
                        "编辑"
                    </button>
                    <button
                        on:click=delete
                        disabled=move || deleting.get()
                        class="px-3 py-1.5 bg-red-600 hover:bg-red-700 disabled:bg-gray-600 rounded-lg text-sm transition-colors"
                    >
                        "删除"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Create / edit table modal. Creation takes floor, name and seats; editing
/// only name and seats, matching the backend contract.
#[component]
fn TableFormModal(
    existing: Option<Table>,
    on_close: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let editing = existing.is_some();
    let (floor, set_floor) = create_signal(
        existing.as_ref().map(|t| t.floor.clone()).unwrap_or_default(),
    );
    let (name, set_name) = create_signal(
        existing.as_ref().map(|t| t.name.clone()).unwrap_or_default(),
    );
    let (seats, set_seats) = create_signal(
        existing.as_ref().map(|t| t.seats.to_string()).unwrap_or_else(|| "4".to_string()),
    );
    let (submitting, set_submitting) = create_signal(false);

    let table_id = existing.map(|t| t.id);

    // Clone on_close for each place it's used
    let on_close_for_submit = on_close.clone();
    let on_close_for_x = on_close.clone();
    let on_close_for_cancel = on_close;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let table_name = name.get().trim().to_string();
        if table_name.is_empty() {
            state.show_error("桌名不能为空");
            return;
        }

        let floor_name = floor.get().trim().to_string();
        if !editing && floor_name.is_empty() {
            state.show_error("楼层不能为空");
            return;
        }

        let seat_count = match seats.get().trim().parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                state.show_error("座位数必须大于0");
                return;
            }
        };

        set_submitting.set(true);

        let state_clone = state.clone();
        let table_id = table_id.clone();
        let on_close_inner = on_close_for_submit.clone();
        spawn_local(async move {
            let result = match table_id {
                Some(id) => api::update_table(&id, &table_name, seat_count)
                    .await
                    .map(|_| "桌位已更新"),
                None => api::create_table(&floor_name, &table_name, seat_count)
                    .await
                    .map(|_| "桌位已新增"),
            };

            match result {
                Ok(message) => {
                    state_clone.show_success(message);
                    refresh_snapshot(&state_clone).await;
                    on_close_inner();
                }
                Err(e) => state_clone.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
            <div class="bg-gray-800 rounded-xl p-6 w-full max-w-md mx-4">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-xl font-semibold">
                        {if editing { "编辑桌位" } else { "新增桌位" }}
                    </h2>
                    <button
                        on:click=move |_| on_close_for_x()
                        class="text-gray-400 hover:text-white"
                    >
                        "✕"
                    </button>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    // Floor (fixed once created)
                    {(!editing).then(|| view! {
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"楼层"</label>
                            <input
                                type="text"
                                placeholder="例如：一楼"
                                prop:value=move || floor.get()
                                on:input=move |ev| set_floor.set(event_target_value(&ev))
                                class="w-full bg-gray-700 rounded-lg px-4 py-3
                                       border border-gray-600 focus:border-primary-500 focus:outline-none"
                            />
                        </div>
                    })}

                    // Name
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"桌名"</label>
                        <input
                            type="text"
                            placeholder="例如：一楼3"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    // Seats
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"座位数"</label>
                        <input
                            type="number"
                            min="1"
                            prop:value=move || seats.get()
                            on:input=move |ev| set_seats.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    // Buttons
                    <div class="flex space-x-3 pt-4">
                        <button
                            type="button"
                            on:click=move |_| on_close_for_cancel()
                            class="flex-1 px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                        >
                            "取消"
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
                                    "创建"
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

/// Danger zone: clear every reservation across all tables
#[component]
fn ClearReservations() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (clearing, set_clearing) = create_signal(false);

    let clear_all = move |_| {
        if !confirm("确定清空全部预定吗？此操作不可恢复") {
            return;
        }
        set_clearing.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::clear_reservations().await {
                Ok(()) => {
                    state.show_success("已清空全部预定");
                    refresh_snapshot(&state).await;
                }
                Err(e) => state.show_error(&e),
            }
            set_clearing.set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 border border-red-900/60">
            <h2 class="text-xl font-semibold mb-2">"危险操作"</h2>
            <p class="text-gray-400 text-sm mb-4">
                "清空全部桌位的预定记录，包含历史记录。"
            </p>
            <button
                on:click=clear_all
                disabled=move || clearing.get()
                class="px-4 py-2 bg-red-600 hover:bg-red-700 disabled:bg-gray-600 rounded-lg font-medium transition-colors"
            >
                {move || if clearing.get() { "清空中..." } else { "清空全部预定" }}
            </button>
        </section>
    }
}
