pub const GREETING: &str =
    "Hello. You may want to visit /flights, /delete_planet or /delay_flights";

/// GET /
pub async fn index() -> &'static str {
    GREETING
}
