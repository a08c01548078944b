//! Reservation-Display Derivation
//!
//! Pure functions deriving presentation state from the fetched snapshot:
//! next-reservation selection, urgency color bucketing, detail-list ordering,
//! and 15-minute time quantization. Everything here is recomputed on each
//! render pass and depends only on the snapshot and the reference time.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::state::global::Reservation;

/// Wire format for reservation start times: minute-precision local ISO-8601,
/// which is also what `<input type="datetime-local">` produces.
pub const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse a backend start time. Second-precision values are accepted too;
/// anything else is treated as absent by the derivations.
pub fn parse_start(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, START_TIME_FORMAT))
        .ok()
}

/// Format a timestamp for the wire and for datetime-local inputs
pub fn format_start(value: NaiveDateTime) -> String {
    value.format(START_TIME_FORMAT).to_string()
}

/// Active reservations with a parseable start, sorted ascending.
/// Ties keep snapshot order (stable sort on the raw timestamp string,
/// whose lexicographic order is chronological for ISO-8601).
fn upcoming_candidates(reservations: &[Reservation]) -> Vec<(&Reservation, NaiveDateTime)> {
    let mut candidates: Vec<(&Reservation, NaiveDateTime)> = reservations
        .iter()
        .filter(|r| r.status.is_active())
        .filter_map(|r| parse_start(&r.start_time).map(|start| (r, start)))
        .collect();

    candidates.sort_by(|a, b| a.0.start_time.cmp(&b.0.start_time));
    candidates
}

/// Select the reservation to surface as "next" for a table.
///
/// First active entry at or after `now`; if every active entry is already in
/// the past, the earliest one is returned instead, so an overdue reservation
/// stays visible until it is archived or cancelled. Callers must not assume
/// the result lies in the future.
pub fn next_reservation<'a>(
    reservations: &'a [Reservation],
    now: NaiveDateTime,
) -> Option<&'a Reservation> {
    let candidates = upcoming_candidates(reservations);

    candidates
        .iter()
        .find(|(_, start)| *start >= now)
        .or_else(|| candidates.first())
        .map(|(r, _)| *r)
}

/// Discrete urgency tier for a table card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Urgency {
    /// Next reservation already in the past
    Overdue,
    /// Within 10 minutes
    Imminent,
    /// Within 30 minutes
    Near,
    /// Within 3 hours
    Soon,
    /// Within 24 hours
    Today,
    /// Nothing upcoming, or nothing within a day
    Neutral,
}

impl Urgency {
    /// Card styling for the dashboard grid
    pub fn card_class(self) -> &'static str {
        match self {
            Urgency::Overdue => "bg-purple-900/60 border-purple-500",
            Urgency::Imminent => "bg-red-900/60 border-red-500",
            Urgency::Near => "bg-orange-900/60 border-orange-500",
            Urgency::Soon => "bg-yellow-900/60 border-yellow-600",
            Urgency::Today => "bg-green-900/60 border-green-600",
            Urgency::Neutral => "bg-gray-800 border-gray-700",
        }
    }

    /// Badge label, none for neutral cards
    pub fn label(self) -> Option<&'static str> {
        match self {
            Urgency::Overdue => Some("已超时"),
            Urgency::Imminent => Some("10分钟内"),
            Urgency::Near => Some("30分钟内"),
            Urgency::Soon => Some("3小时内"),
            Urgency::Today => Some("今日"),
            Urgency::Neutral => None,
        }
    }
}

/// Map minutes-until-next to an urgency tier. Ordered thresholds,
/// first match wins.
fn bucket(diff_minutes: i64) -> Urgency {
    if diff_minutes < 0 {
        Urgency::Overdue
    } else if diff_minutes <= 10 {
        Urgency::Imminent
    } else if diff_minutes <= 30 {
        Urgency::Near
    } else if diff_minutes <= 180 {
        Urgency::Soon
    } else if diff_minutes <= 1440 {
        Urgency::Today
    } else {
        Urgency::Neutral
    }
}

/// Urgency tier for a table, derived from the reservation surfaced by
/// [`next_reservation`]: `round((start − now) / 60s)` minutes pushed through
/// the threshold table. No active reservation means no color.
pub fn urgency(reservations: &[Reservation], now: NaiveDateTime) -> Urgency {
    let Some(next) = next_reservation(reservations, now) else {
        return Urgency::Neutral;
    };
    let Some(start) = parse_start(&next.start_time) else {
        return Urgency::Neutral;
    };

    // Half-up rounding, matching Math.round over a millisecond delta
    let diff_minutes = ((start - now).num_seconds() as f64 / 60.0 + 0.5).floor() as i64;
    bucket(diff_minutes)
}

/// Order a table's reservations for the detail list: active entries first,
/// soonest first; then everything else, most recent first. Stable for equal
/// timestamps, and no non-active entry ever precedes an active one.
pub fn display_order(reservations: &[Reservation]) -> Vec<Reservation> {
    let (mut active, mut inactive): (Vec<Reservation>, Vec<Reservation>) = reservations
        .iter()
        .cloned()
        .partition(|r| r.status.is_active());

    active.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    inactive.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    active.extend(inactive);
    active
}

/// Default start suggestion for a new reservation: round UP to the next
/// 15-minute boundary (a time already on a boundary advances a full
/// 15 minutes), seconds zeroed.
pub fn next_quarter_hour(now: NaiveDateTime) -> NaiveDateTime {
    let base = now
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);

    let remainder = base.minute() % 15;
    let increment = if remainder == 0 { 15 } else { 15 - remainder };
    base + Duration::minutes(increment as i64)
}

/// Submission normalization: force the minute DOWN to the nearest lower
/// 15-minute multiple, seconds zeroed.
///
/// Deliberately asymmetric with [`next_quarter_hour`]: the default suggests
/// rounding up, submission rounds down. Product behavior carried over as-is.
pub fn align_quarter_down(value: NaiveDateTime) -> NaiveDateTime {
    value
        .with_minute(value.minute() / 15 * 15)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::ReservationStatus;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 30)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    fn res(id: &str, start: NaiveDateTime, status: ReservationStatus) -> Reservation {
        Reservation {
            id: id.to_string(),
            table_id: "tbl-1".to_string(),
            guest_name: "王先生".to_string(),
            phone: "13800000000".to_string(),
            party_size: 4,
            start_time: format_start(start),
            notes: String::new(),
            status,
        }
    }

    fn active(id: &str, offset_minutes: i64) -> Reservation {
        res(
            id,
            now() + Duration::minutes(offset_minutes),
            ReservationStatus::Active,
        )
    }

    #[test]
    fn test_next_picks_first_future() {
        // +5m, -100m, +2d: the upcoming entry wins, not the overdue one
        let reservations = vec![
            active("soon", 5),
            active("overdue", -100),
            active("far", 2 * 24 * 60),
        ];

        let next = next_reservation(&reservations, now()).unwrap();
        assert_eq!(next.id, "soon");
        assert_eq!(urgency(&reservations, now()), Urgency::Imminent);
    }

    #[test]
    fn test_next_falls_back_to_earliest_overdue() {
        let reservations = vec![active("late", -10), active("earliest", -90)];

        let next = next_reservation(&reservations, now()).unwrap();
        assert_eq!(next.id, "earliest");
        assert_eq!(urgency(&reservations, now()), Urgency::Overdue);
    }

    #[test]
    fn test_non_active_never_selected() {
        let reservations = vec![
            res("cancelled", now() + Duration::minutes(5), ReservationStatus::Cancelled),
            res("arrived", now() - Duration::minutes(5), ReservationStatus::Arrived),
        ];

        assert!(next_reservation(&reservations, now()).is_none());
        assert_eq!(urgency(&reservations, now()), Urgency::Neutral);
    }

    #[test]
    fn test_unparseable_start_discarded() {
        let mut broken = active("broken", 5);
        broken.start_time = "tonight-ish".to_string();
        let reservations = vec![broken, active("ok", 20)];

        assert_eq!(next_reservation(&reservations, now()).unwrap().id, "ok");
    }

    #[test]
    fn test_empty_set_reports_none() {
        assert!(next_reservation(&[], now()).is_none());
        assert_eq!(urgency(&[], now()), Urgency::Neutral);
    }

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(bucket(-1), Urgency::Overdue);
        assert_eq!(bucket(0), Urgency::Imminent);
        assert_eq!(bucket(10), Urgency::Imminent);
        assert_eq!(bucket(11), Urgency::Near);
        assert_eq!(bucket(30), Urgency::Near);
        assert_eq!(bucket(31), Urgency::Soon);
        assert_eq!(bucket(180), Urgency::Soon);
        assert_eq!(bucket(181), Urgency::Today);
        assert_eq!(bucket(1440), Urgency::Today);
        assert_eq!(bucket(1441), Urgency::Neutral);
    }

    #[test]
    fn test_urgency_at_exact_start() {
        let reservations = vec![active("on-time", 0)];
        assert_eq!(urgency(&reservations, now()), Urgency::Imminent);
    }

    #[test]
    fn test_display_order_partitions_and_sorts() {
        let reservations = vec![
            res("arrived-early", now() - Duration::hours(3), ReservationStatus::Arrived),
            active("b", 60),
            res("cancelled-late", now() - Duration::hours(1), ReservationStatus::Cancelled),
            active("a", 10),
        ];

        let ordered = display_order(&reservations);
        let ids: Vec<&str> = ordered.iter().map(|r| r.id.as_str()).collect();
        // Active ascending, then non-active descending
        assert_eq!(ids, vec!["a", "b", "cancelled-late", "arrived-early"]);

        // No non-active entry before an active one
        let first_inactive = ordered
            .iter()
            .position(|r| !r.status.is_active())
            .unwrap();
        assert!(ordered[..first_inactive].iter().all(|r| r.status.is_active()));
    }

    #[test]
    fn test_display_order_stable_for_equal_timestamps() {
        let reservations = vec![active("first", 30), active("second", 30)];

        let ordered = display_order(&reservations);
        assert_eq!(ordered[0].id, "first");
        assert_eq!(ordered[1].id, "second");
    }

    #[test]
    fn test_next_quarter_hour_rounds_up() {
        let at = |h: u32, m: u32, s: u32| {
            NaiveDate::from_ymd_opt(2026, 8, 30)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap()
        };

        // minute 37 suggests 45
        assert_eq!(next_quarter_hour(at(18, 37, 12)), at(18, 45, 0));
        // exact boundary advances a full slot
        assert_eq!(next_quarter_hour(at(18, 30, 0)), at(18, 45, 0));
        // rolls over the hour
        assert_eq!(next_quarter_hour(at(18, 55, 0)), at(19, 0, 0));
    }

    #[test]
    fn test_align_quarter_down() {
        let at = |h: u32, m: u32, s: u32| {
            NaiveDate::from_ymd_opt(2026, 8, 30)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap()
        };

        // minute 37 submits as 30: the intentional asymmetry with the
        // round-up default
        assert_eq!(align_quarter_down(at(18, 37, 50)), at(18, 30, 0));
        assert_eq!(align_quarter_down(at(18, 45, 0)), at(18, 45, 0));
        assert_eq!(align_quarter_down(at(18, 14, 59)), at(18, 0, 0));
    }

    #[test]
    fn test_parse_start_formats() {
        assert!(parse_start("2026-08-30T18:30").is_some());
        assert!(parse_start("2026-08-30T18:30:15").is_some());
        assert!(parse_start("30/08/2026 18:30").is_none());
        assert!(parse_start("").is_none());
    }
}
