//! Global Application State
//!
//! Reactive view model using Leptos signals. The table snapshot is
//! immutable-per-fetch: every successful fetch replaces it wholesale, and all
//! presentation state is re-derived from it on render.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Latest table/reservation snapshot from the API
    pub tables: RwSignal<Vec<Table>>,
    /// Table currently open in the detail modal (by id)
    pub selected_table: RwSignal<Option<String>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Timestamp (ms) of the last successful snapshot fetch
    pub last_refresh: RwSignal<Option<i64>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// A restaurant table as returned by the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Table {
    pub id: String,
    pub floor: String,
    pub name: String,
    pub seats: u32,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// A reservation as returned by the API
///
/// `start_time` stays a string on this side of the wire: the backend emits
/// minute-precision local ISO-8601 and the derivations in [`crate::schedule`]
/// parse it on demand, discarding entries that do not parse.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Reservation {
    pub id: String,
    pub table_id: String,
    pub guest_name: String,
    #[serde(default)]
    pub phone: String,
    pub party_size: u32,
    pub start_time: String,
    #[serde(default)]
    pub notes: String,
    pub status: ReservationStatus,
}

/// Reservation lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Arrived,
    Archived,
    Cancelled,
}

impl ReservationStatus {
    /// Only active reservations drive card color and "next" selection,
    /// and only they may be edited.
    pub fn is_active(self) -> bool {
        matches!(self, ReservationStatus::Active)
    }

    /// Badge label for the detail list
    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::Active => "待到店",
            ReservationStatus::Arrived => "已到店",
            ReservationStatus::Archived => "已归档",
            ReservationStatus::Cancelled => "已取消",
        }
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        tables: create_rw_signal(Vec::new()),
        selected_table: create_rw_signal(None),
        loading: create_rw_signal(false),
        last_refresh: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Look up a table in the current snapshot
    pub fn table_by_id(&self, table_id: &str) -> Option<Table> {
        self.tables.get().into_iter().find(|t| t.id == table_id)
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}

/// Group tables by floor, preserving the server's ordering of both floors
/// and tables within a floor.
pub fn group_by_floor(tables: &[Table]) -> Vec<(String, Vec<Table>)> {
    let mut groups: Vec<(String, Vec<Table>)> = Vec::new();

    for table in tables {
        match groups.iter_mut().find(|(floor, _)| *floor == table.floor) {
            Some((_, members)) => members.push(table.clone()),
            None => groups.push((table.floor.clone(), vec![table.clone()])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: &str, floor: &str) -> Table {
        Table {
            id: id.to_string(),
            floor: floor.to_string(),
            name: id.to_string(),
            seats: 4,
            reservations: Vec::new(),
        }
    }

    #[test]
    fn test_group_by_floor_preserves_server_order() {
        let tables = vec![
            table("a", "一楼"),
            table("b", "一楼"),
            table("c", "二楼"),
            table("d", "一楼"),
        ];

        let groups = group_by_floor(&tables);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "一楼");
        assert_eq!(
            groups[0].1.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "d"]
        );
        assert_eq!(groups[1].0, "二楼");
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn test_status_wire_format() {
        let status: ReservationStatus = serde_json::from_str("\"arrived\"").unwrap();
        assert_eq!(status, ReservationStatus::Arrived);
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Active).unwrap(),
            "\"active\""
        );
    }

    #[test]
    fn test_reservation_optional_fields_default() {
        let json = r#"{
            "id": "res-1",
            "table_id": "tbl-1",
            "guest_name": "王先生",
            "party_size": 4,
            "start_time": "2026-08-30T18:30",
            "status": "active"
        }"#;

        let res: Reservation = serde_json::from_str(json).unwrap();
        assert!(res.phone.is_empty());
        assert!(res.notes.is_empty());
        assert!(res.status.is_active());
    }
}
