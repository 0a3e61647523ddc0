//! Read-only queries against the observation dataset.
//!
//! All date parameters arrive as canonical `YYYY-MM-DD` strings, validated
//! upstream; filtering and grouping happen on the string-typed date column.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::models::{DailyTempSummary, ObservationRow, Station};

/// Measurement column selected by the observation listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationField {
    Precipitation,
    Temperature,
}

impl ObservationField {
    /// Column name in the `measurement` table.
    fn column(self) -> &'static str {
        match self {
            ObservationField::Precipitation => "prcp",
            ObservationField::Temperature => "tobs",
        }
    }
}

/// Latest observation date across all measurements.
///
/// Returns `None` when the measurement table is empty. The caller treats
/// that as fatal at startup: without an anchor the default lookback window
/// cannot be computed.
pub async fn latest_date(pool: &SqlitePool) -> Result<Option<NaiveDate>, sqlx::Error> {
    let max: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
        .fetch_one(pool)
        .await?;

    match max {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| sqlx::Error::Decode(Box::new(e))),
    }
}

/// All stations with full metadata, in storage order.
pub async fn list_stations(pool: &SqlitePool) -> Result<Vec<Station>, sqlx::Error> {
    sqlx::query_as::<_, Station>(
        "SELECT id, station, name, latitude, longitude, elevation FROM station",
    )
    .fetch_all(pool)
    .await
}

/// Station codes only, same cardinality as `list_stations`.
pub async fn station_names(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT station FROM station")
        .fetch_all(pool)
        .await
}

/// Every observation of `field` strictly after `start` and, when `end` is
/// given, at or before it. One row per (station, date) observation, so
/// dates repeat when several stations report the same day. Ordered by date
/// ascending.
pub async fn measurements_in_range(
    pool: &SqlitePool,
    field: ObservationField,
    start: &str,
    end: Option<&str>,
) -> Result<Vec<ObservationRow>, sqlx::Error> {
    let mut sql = format!(
        "SELECT date, {} AS value, station FROM measurement WHERE date > ?",
        field.column()
    );
    if end.is_some() {
        sql.push_str(" AND date <= ?");
    }
    sql.push_str(" ORDER BY date ASC");

    let mut query = sqlx::query_as::<_, ObservationRow>(&sql).bind(start);
    if let Some(end) = end {
        query = query.bind(end);
    }
    query.fetch_all(pool).await
}

/// Min/avg/max observed temperature per date for dates in `[start, end]`
/// (upper bound open when `end` is `None`), aggregated across all stations
/// reporting on each date, ordered by date ascending.
pub async fn temperature_summary(
    pool: &SqlitePool,
    start: &str,
    end: Option<&str>,
) -> Result<Vec<DailyTempSummary>, sqlx::Error> {
    let mut sql = String::from(
        "SELECT date, MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax
         FROM measurement WHERE date >= ?",
    );
    if end.is_some() {
        sql.push_str(" AND date <= ?");
    }
    sql.push_str(" GROUP BY date ORDER BY date ASC");

    let mut query = sqlx::query_as::<_, DailyTempSummary>(&sql).bind(start);
    if let Some(end) = end {
        query = query.bind(end);
    }
    query.fetch_all(pool).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory database with the two dataset tables, empty.
    ///
    /// A single connection is required: every new connection to
    /// `sqlite::memory:` gets its own fresh database, so a larger pool
    /// would hand out connections that never saw the schema.
    pub(crate) async fn empty_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        sqlx::query(
            "CREATE TABLE station (
                 id INTEGER PRIMARY KEY,
                 station TEXT NOT NULL,
                 name TEXT NOT NULL,
                 latitude REAL NOT NULL,
                 longitude REAL NOT NULL,
                 elevation REAL NOT NULL
             )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE measurement (
                 id INTEGER PRIMARY KEY,
                 station TEXT NOT NULL,
                 date TEXT NOT NULL,
                 prcp REAL,
                 tobs REAL NOT NULL
             )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    /// Two stations, five observations, latest date 2017-08-23.
    ///
    /// The 2016-01-05 row sits outside the trailing-year window of the
    /// latest date; the 2017-08-23 row has no precipitation reading.
    pub(crate) async fn seeded_pool() -> SqlitePool {
        let pool = empty_pool().await;

        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES
                 ('USC00511111', 'WAIKIKI 717.2, HI US', 21.2716, -157.8168, 3.0),
                 ('USC00522222', 'KANEOHE 838.1, HI US', 21.4234, -157.8015, 14.6)",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES
                 ('USC00511111', '2016-01-05', 0.3, 70.0),
                 ('USC00511111', '2017-08-20', 1.2, 75.0),
                 ('USC00522222', '2017-08-20', 0.0, 78.0),
                 ('USC00511111', '2017-08-21', 0.0, 76.0),
                 ('USC00522222', '2017-08-23', NULL, 77.0)",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn test_latest_date_is_max_measurement_date() {
        let pool = seeded_pool().await;
        let latest = latest_date(&pool).await.unwrap();
        assert_eq!(latest, NaiveDate::from_ymd_opt(2017, 8, 23));
    }

    #[tokio::test]
    async fn test_latest_date_empty_table_is_none() {
        let pool = empty_pool().await;
        let latest = latest_date(&pool).await.unwrap();
        assert_eq!(latest, None);
    }

    #[tokio::test]
    async fn test_station_names_match_station_count() {
        let pool = seeded_pool().await;
        let names = station_names(&pool).await.unwrap();
        assert_eq!(names, vec!["USC00511111", "USC00522222"]);
    }

    #[tokio::test]
    async fn test_list_stations_carries_all_attributes() {
        let pool = seeded_pool().await;
        let stations = list_stations(&pool).await.unwrap();
        assert_eq!(stations.len(), 2);

        let waikiki = &stations[0];
        assert_eq!(waikiki.station, "USC00511111");
        assert_eq!(waikiki.name, "WAIKIKI 717.2, HI US");
        assert!((waikiki.latitude - 21.2716).abs() < 1e-9);
        assert!((waikiki.longitude - -157.8168).abs() < 1e-9);
        assert!((waikiki.elevation - 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_measurements_lower_bound_is_strict() {
        let pool = seeded_pool().await;
        let rows = measurements_in_range(&pool, ObservationField::Temperature, "2017-08-20", None)
            .await
            .unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2017-08-21", "2017-08-23"]);
    }

    #[tokio::test]
    async fn test_measurements_upper_bound_is_inclusive() {
        let pool = seeded_pool().await;
        let rows = measurements_in_range(
            &pool,
            ObservationField::Temperature,
            "2017-08-19",
            Some("2017-08-20"),
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.date == "2017-08-20"));
    }

    #[tokio::test]
    async fn test_measurements_one_row_per_station_date() {
        let pool = seeded_pool().await;
        let rows = measurements_in_range(&pool, ObservationField::Precipitation, "2016-08-23", None)
            .await
            .unwrap();
        // Four qualifying observations, two of them sharing a date.
        assert_eq!(rows.len(), 4);
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2017-08-20", "2017-08-20", "2017-08-21", "2017-08-23"]
        );
    }

    #[tokio::test]
    async fn test_measurements_missing_precipitation_is_none() {
        let pool = seeded_pool().await;
        let rows = measurements_in_range(&pool, ObservationField::Precipitation, "2017-08-22", None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].station, "USC00522222");
        assert_eq!(rows[0].value, None);
    }

    #[tokio::test]
    async fn test_measurements_select_requested_field_only() {
        let pool = seeded_pool().await;
        let rows = measurements_in_range(&pool, ObservationField::Temperature, "2017-08-22", None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, Some(77.0));
    }

    #[tokio::test]
    async fn test_temperature_summary_single_date() {
        let pool = seeded_pool().await;
        let rows = temperature_summary(&pool, "2017-08-20", Some("2017-08-20"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2017-08-20");
        assert_eq!(rows[0].tmin, 75.0);
        assert_eq!(rows[0].tavg, 76.5);
        assert_eq!(rows[0].tmax, 78.0);
    }

    #[tokio::test]
    async fn test_temperature_summary_bounds_are_inclusive() {
        let pool = seeded_pool().await;
        let rows = temperature_summary(&pool, "2017-08-20", None).await.unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2017-08-20", "2017-08-21", "2017-08-23"]);
        for row in &rows {
            assert!(row.tmin <= row.tavg && row.tavg <= row.tmax);
        }
    }

    #[tokio::test]
    async fn test_temperature_summary_beyond_data_is_empty() {
        let pool = seeded_pool().await;
        let rows = temperature_summary(&pool, "2099-01-01", None).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_bounded_summary_is_subset_of_open_summary() {
        let pool = seeded_pool().await;
        let open = temperature_summary(&pool, "2017-08-20", None).await.unwrap();
        let bounded = temperature_summary(&pool, "2017-08-20", Some("2017-08-21"))
            .await
            .unwrap();

        let open_dates: Vec<&str> = open
            .iter()
            .map(|r| r.date.as_str())
            .filter(|d| *d <= "2017-08-21")
            .collect();
        let bounded_dates: Vec<&str> = bounded.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(bounded_dates, open_dates);
    }
}
