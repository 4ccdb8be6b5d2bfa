use bigdecimal::BigDecimal;
use diesel::prelude::*;

/// A destination planet. Names are unique across the table.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::planet)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Planet {
    pub id: i32,
    pub distance: BigDecimal,
    pub name: String,
}

/// Insertable form of a planet; the id is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::planet)]
pub struct NewPlanet {
    pub distance: BigDecimal,
    pub name: String,
}

impl NewPlanet {
    pub fn new(name: impl Into<String>, distance: impl Into<BigDecimal>) -> Self {
        Self {
            name: name.into(),
            distance: distance.into(),
        }
    }
}
