use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::ApiError;
use crate::planets_repo::{PlanetsRepository, is_foreign_key_violation};
use crate::web::AppState;

pub const DELETE_PLANET_USAGE: &str =
    "Please specify planet_id, like this: /delete_planet?planet_id=1";

#[derive(Debug, Deserialize)]
pub struct DeletePlanetParams {
    pub planet_id: Option<String>,
}

/// GET /delete_planet
/// Delete a planet by id; an unknown id is a no-op
pub async fn delete_planet(
    State(state): State<AppState>,
    Query(params): Query<DeletePlanetParams>,
) -> Result<Response, ApiError> {
    let Some(raw_id) = params.planet_id else {
        return Ok(DELETE_PLANET_USAGE.into_response());
    };

    let planet_id: i32 = raw_id.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!("Invalid planet_id '{}': expected an integer", raw_id))
    })?;

    let planets_repo = PlanetsRepository::new(state.pool);
    match planets_repo.delete_planet(planet_id).await {
        Ok(0) => info!("No planet with id {} to delete", planet_id),
        Ok(_) => info!("Deleted planet {}", planet_id),
        Err(e) => {
            if is_foreign_key_violation(&e) {
                error!(
                    "Planet {} is still referenced by flights and cannot be deleted",
                    planet_id
                );
            }
            return Err(e.into());
        }
    }

    Ok(StatusCode::OK.into_response())
}
