use sqlx::FromRow;

/// A weather station from the `station` table.
///
/// The schema is fixed and known, so rows map onto statically declared
/// structs rather than anything reflective.
#[derive(Debug, Clone, FromRow)]
pub struct Station {
    pub id: i64,
    /// Unique, stable station code (e.g. "USC00519397"). Measurements
    /// reference stations by this code; no foreign key is enforced.
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// One (station, date) observation of a single measurement column.
///
/// `value` carries whichever column the query selected: precipitation,
/// which may be absent for a given day, or observed temperature.
#[derive(Debug, Clone, FromRow)]
pub struct ObservationRow {
    /// Observation date in canonical `YYYY-MM-DD` form.
    pub date: String,
    pub value: Option<f64>,
    /// Code of the reporting station.
    pub station: String,
}

/// Min/avg/max observed temperature for one date, across all stations
/// reporting that day.
#[derive(Debug, Clone, FromRow)]
pub struct DailyTempSummary {
    pub date: String,
    pub tmin: f64,
    pub tavg: f64,
    pub tmax: f64,
}
