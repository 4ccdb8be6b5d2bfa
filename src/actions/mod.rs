pub mod flights;
pub mod index;
pub mod planets;
pub mod views;

pub use flights::*;
pub use index::*;
pub use planets::*;

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::flights::parse_flight_date;

/// Parse a `flight_date` query value, rejecting anything that is not `yyyy-MM-dd`.
pub(crate) fn parse_date_param(raw: &str) -> Result<NaiveDate, ApiError> {
    parse_flight_date(raw).map_err(|e| {
        ApiError::BadRequest(format!(
            "Invalid flight_date '{}': {} (expected yyyy-MM-dd, e.g. 2084-06-12)",
            raw, e
        ))
    })
}
