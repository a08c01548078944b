//! Dashboard Page
//!
//! Front-of-house floor plan: tables grouped by floor, one urgency-colored
//! card each, with the reservation detail modal layered on top.

use leptos::*;

use crate::components::{CardSkeleton, ReservationModal, TableCard};
use crate::state::global::{group_by_floor, GlobalState, Table};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"前台看板"</h1>
                    <p class="text-gray-400 mt-1">"按楼层查看桌位与最近预定"</p>
                </div>
            </div>

            // Floor sections, re-derived from each snapshot
            {move || {
                let tables = state.tables.get();

                if tables.is_empty() {
                    if state.loading.get() {
                        return view! {
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                                <CardSkeleton />
                                <CardSkeleton />
                                <CardSkeleton />
                                <CardSkeleton />
                            </div>
                        }.into_view();
                    }
                    let loaded = state.last_refresh.get().is_some();
                    return view! {
                        <p class="text-gray-400 py-12 text-center">
                            {empty_state_hint(loaded)}
                        </p>
                    }.into_view();
                }

                group_by_floor(&tables)
                    .into_iter()
                    .map(|(floor, members)| view! {
                        <FloorSection floor=floor tables=members />
                    })
                    .collect_view()
            }}

            // Detail modal for the selected table
            <ReservationModal />
        </div>
    }
}

/// Empty-grid hint: only claim "no tables" once a snapshot actually loaded;
/// before that the backend may simply have been unreachable.
fn empty_state_hint(loaded: bool) -> &'static str {
    if loaded {
        "暂无桌位，请先在桌位管理中添加"
    } else {
        "无法加载桌位数据，请稍后重试"
    }
}

/// One section per floor, cards in server order
#[component]
fn FloorSection(floor: String, tables: Vec<Table>) -> impl IntoView {
    view! {
        <section>
            <h2 class="text-lg font-semibold mb-4">{floor}</h2>
            <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4">
                {tables
                    .into_iter()
                    .map(|table| view! { <TableCard table=table /> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_distinguishes_failed_load() {
        // A snapshot that loaded and is empty really means no tables
        assert_eq!(empty_state_hint(true), "暂无桌位，请先在桌位管理中添加");
        // Before any snapshot lands, an empty grid must not claim that
        assert_eq!(empty_state_hint(false), "无法加载桌位数据，请稍后重试");
    }
}
