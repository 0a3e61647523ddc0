//! Default-window logic and response shaping for the climate endpoints.

use chrono::{Duration, NaiveDate};
use serde_json::{Map, Value};

use crate::db::models::ObservationRow;

/// Days of history covered by the default lookback window.
const LOOKBACK_DAYS: i64 = 365;

/// Start of the default trailing-year window.
///
/// Anchored to the most recent observation date in the dataset, never to
/// wall-clock time; the dataset may be years old. The range filter applied
/// downstream is strict (`date > start`), so subtracting 365 days yields
/// exactly the trailing 365 days of observations.
pub fn default_window_start(latest: NaiveDate) -> NaiveDate {
    latest - Duration::days(LOOKBACK_DAYS)
}

/// Check that a path parameter is shaped like an ISO `YYYY-MM-DD` date.
///
/// Shape only: four digits, dash, two digits, dash, two digits. No calendar
/// validation; range filtering happens on the canonical string form, and
/// any well-shaped string compares lexically.
pub fn is_iso_date_shaped(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Shape observation rows for the listing endpoints.
///
/// Each row becomes `{<date>: <value-or-null>, "Station": <code>}`. Rows stay
/// one-per-(station, date): the same date appears once for every station that
/// reported it, so observations never collapse into each other the way a
/// single date-keyed dictionary would.
pub fn shape_observations(rows: Vec<ObservationRow>) -> Vec<Map<String, Value>> {
    rows.into_iter()
        .map(|row| {
            let mut entry = Map::with_capacity(2);
            entry.insert(row.date, row.value.map_or(Value::Null, Value::from));
            entry.insert("Station".to_string(), Value::String(row.station));
            entry
        })
        .collect()
}
