use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use hello_db::PgPool;
use hello_db::flights::NewFlight;
use hello_db::planets::NewPlanet;
use tracing::info;

/// Demo planets: name and distance from Earth in millions of kilometres.
const PLANETS: &[(&str, i64)] = &[
    ("Mars", 225),
    ("Venus", 261),
    ("Jupiter", 778),
    ("Saturn", 1400),
];

/// Demo flights: planet name and departure date.
const FLIGHTS: &[(&str, (i32, u32, u32))] = &[
    ("Mars", (2084, 6, 12)),
    ("Mars", (2084, 6, 19)),
    ("Venus", (2084, 6, 12)),
    ("Jupiter", (2085, 1, 3)),
];

/// Seed a small, known data set for demos and manual testing.
///
/// Planets are matched by name, so running the command twice adds no
/// duplicate planets. Flights are only added while the flight table is empty.
pub async fn handle_seed(pool: PgPool) -> Result<()> {
    info!("Starting demo data seed");

    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().context("Failed to get database connection")?;
        seed(&mut conn)
    })
    .await??;

    info!("Demo data seed completed successfully");
    Ok(())
}

fn seed(conn: &mut PgConnection) -> Result<()> {
    use hello_db::schema::{flight, planet};

    let new_planets: Vec<NewPlanet> = PLANETS
        .iter()
        .map(|(name, distance)| NewPlanet::new(*name, BigDecimal::from(*distance)))
        .collect();

    let inserted = diesel::insert_into(planet::table)
        .values(&new_planets)
        .on_conflict(planet::name)
        .do_nothing()
        .execute(conn)
        .context("Failed to insert demo planets")?;
    info!("Inserted {} planets", inserted);

    let existing: i64 = flight::table.count().get_result(conn)?;
    if existing > 0 {
        info!("Flight table already has {} rows, skipping demo flights", existing);
        return Ok(());
    }

    let mut flights_added = 0;
    for (planet_name, (year, month, day)) in FLIGHTS {
        let planet_id: i32 = planet::table
            .filter(planet::name.eq(*planet_name))
            .select(planet::id)
            .first(conn)
            .with_context(|| format!("Planet {} missing after seeding", planet_name))?;

        let date = NaiveDate::from_ymd_opt(*year, *month, *day)
            .with_context(|| format!("Invalid demo date {}-{}-{}", year, month, day))?;

        diesel::insert_into(flight::table)
            .values(&NewFlight { date, planet_id })
            .execute(conn)?;
        flights_added += 1;
    }
    info!("Inserted {} flights", flights_added);

    Ok(())
}
