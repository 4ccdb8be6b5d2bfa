use anyhow::Result;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::db::PgPool;
use crate::planets::{NewPlanet, Planet};

#[derive(Clone)]
pub struct PlanetsRepository {
    pool: PgPool,
}

impl PlanetsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a planet and return it with its generated id.
    ///
    /// A duplicate name fails with a unique-violation database error.
    pub async fn create_planet(&self, new_planet: NewPlanet) -> Result<Planet> {
        use crate::schema::planet;

        let pool = self.pool.clone();

        let created = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            let created = diesel::insert_into(planet::table)
                .values(&new_planet)
                .returning(Planet::as_returning())
                .get_result(&mut conn)?;

            Ok::<Planet, anyhow::Error>(created)
        })
        .await??;

        Ok(created)
    }

    /// Get a planet by its ID
    pub async fn get_planet_by_id(&self, planet_id: i32) -> Result<Option<Planet>> {
        use crate::schema::planet::dsl::*;

        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            let found = planet
                .find(planet_id)
                .select(Planet::as_select())
                .first(&mut conn)
                .optional()?;

            Ok::<Option<Planet>, anyhow::Error>(found)
        })
        .await??;

        Ok(result)
    }

    /// Delete the planet with the given id and return the number of rows removed.
    ///
    /// Deleting an id that does not exist removes nothing and is not an error.
    /// A planet still referenced by flights is protected by the foreign key and
    /// the delete fails.
    pub async fn delete_planet(&self, planet_id: i32) -> Result<usize> {
        use crate::schema::planet::dsl::*;

        let pool = self.pool.clone();

        let rows_affected = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;

            let rows = diesel::delete(planet.filter(id.eq(planet_id))).execute(&mut conn)?;

            Ok::<usize, anyhow::Error>(rows)
        })
        .await??;

        Ok(rows_affected)
    }
}

/// True when `err` is a database rejection caused by a foreign key.
pub fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            _
        ))
    )
}

/// True when `err` is a database rejection caused by a unique constraint.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
    )
}
