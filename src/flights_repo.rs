use anyhow::Result;
use chrono::NaiveDate;
use diesel::pg::data_types::PgInterval;
use diesel::prelude::*;
use diesel::sql_types::{Date, Interval};

use crate::db::PgPool;
use crate::flights::{DateInterval, Flight, FlightListing, NewFlight};

// `date + interval` yields a timestamp; the assignment casts it back to a date.
const DELAY_FLIGHTS_SQL: &str = "UPDATE flight SET date = date + $1 WHERE date = $2";

#[derive(Clone)]
pub struct FlightsRepository {
    pool: PgPool,
}

impl FlightsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new flight and return it with its generated id
    pub async fn create_flight(&self, new_flight: NewFlight) -> Result<Flight> {
        use crate::schema::flight;

        let pool = self.pool.clone();

        let created = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            let created = diesel::insert_into(flight::table)
                .values(&new_flight)
                .returning(Flight::as_returning())
                .get_result(&mut conn)?;

            Ok::<Flight, anyhow::Error>(created)
        })
        .await??;

        Ok(created)
    }

    /// Get a flight by its ID
    pub async fn get_flight_by_id(&self, flight_id: i32) -> Result<Option<Flight>> {
        use crate::schema::flight::dsl::*;

        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            let found = flight
                .find(flight_id)
                .select(Flight::as_select())
                .first(&mut conn)
                .optional()?;

            Ok::<Option<Flight>, anyhow::Error>(found)
        })
        .await??;

        Ok(result)
    }

    /// List flights joined with their planet, optionally only those on `on_date`.
    ///
    /// Flights whose planet no longer resolves are dropped by the inner join.
    /// No ordering is applied; rows come back in whatever order the database
    /// produces them.
    pub async fn list_flights(&self, on_date: Option<NaiveDate>) -> Result<Vec<FlightListing>> {
        use crate::schema::{flight, planet};

        let pool = self.pool.clone();

        let rows = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            let mut query = flight::table
                .inner_join(planet::table)
                .select((flight::id, flight::date, planet::name, planet::id))
                .into_boxed();

            if let Some(day) = on_date {
                query = query.filter(flight::date.eq(day));
            }

            let rows = query.load::<FlightListing>(&mut conn)?;

            Ok::<Vec<FlightListing>, anyhow::Error>(rows)
        })
        .await??;

        Ok(rows)
    }

    /// Shift every flight dated exactly `on_date` by `interval` in one statement.
    ///
    /// Returns the number of flights moved. Flights on other dates are untouched.
    pub async fn delay_flights(&self, on_date: NaiveDate, interval: DateInterval) -> Result<usize> {
        let pool = self.pool.clone();

        let rows_affected = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            let rows = diesel::sql_query(DELAY_FLIGHTS_SQL)
                .bind::<Interval, _>(PgInterval::from(interval))
                .bind::<Date, _>(on_date)
                .execute(&mut conn)?;

            Ok::<usize, anyhow::Error>(rows)
        })
        .await??;

        Ok(rows_affected)
    }
}
