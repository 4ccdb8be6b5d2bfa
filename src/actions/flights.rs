use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::flights::DateInterval;
use crate::flights_repo::FlightsRepository;
use crate::web::AppState;

use super::{parse_date_param, views::render_flights_table};

pub const DELAY_FLIGHTS_USAGE: &str = "Please specify flight_date and interval arguments, like this: /delay_flights?flight_date=2084-06-12&interval=1week";

#[derive(Debug, Deserialize)]
pub struct FlightsQueryParams {
    pub flight_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DelayFlightsParams {
    pub flight_date: Option<String>,
    pub interval: Option<String>,
}

/// GET /flights
/// Render every flight, or only those on `flight_date`, as an HTML table
pub async fn list_flights(
    State(state): State<AppState>,
    Query(params): Query<FlightsQueryParams>,
) -> Result<Html<String>, ApiError> {
    let on_date = params
        .flight_date
        .as_deref()
        .map(parse_date_param)
        .transpose()?;

    let flights_repo = FlightsRepository::new(state.pool);
    let rows = flights_repo.list_flights(on_date).await?;
    debug!("Listing {} flights (date filter: {:?})", rows.len(), on_date);

    Ok(Html(render_flights_table(&rows)))
}

/// GET /delay_flights
/// Move every flight on `flight_date` by `interval`, e.g. `1day` or `2weeks`
pub async fn delay_flights(
    State(state): State<AppState>,
    Query(params): Query<DelayFlightsParams>,
) -> Result<Response, ApiError> {
    let (Some(raw_date), Some(raw_interval)) = (params.flight_date, params.interval) else {
        return Ok(DELAY_FLIGHTS_USAGE.into_response());
    };

    let on_date = parse_date_param(&raw_date)?;
    let interval: DateInterval = raw_interval.parse().map_err(|e| {
        ApiError::BadRequest(format!("Invalid interval '{}': {}", raw_interval, e))
    })?;

    let flights_repo = FlightsRepository::new(state.pool);
    let moved = flights_repo.delay_flights(on_date, interval).await?;
    info!("Delayed {} flights on {} by {}", moved, on_date, interval);

    Ok(StatusCode::OK.into_response())
}
