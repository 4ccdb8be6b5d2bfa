use std::fmt::Write;

use crate::flights::{FLIGHT_DATE_FORMAT, FlightListing};

const PAGE_HEAD: &str = r#"<html>
<head>
<meta charset="utf-8">
<title>Flights</title>
<style>
    table > * {
        text-align: left;
    }
    td {
        padding: 5px;
    }
    table {
        border-spacing: 5px;
        border: solid grey 1px;
        text-align: left;
    }
</style>
</head>
<body>
<table>
    <tr><th>Flight ID</th><th>Date</th><th>Planet</th><th>Planet ID</th></tr>
"#;

const PAGE_TAIL: &str = "</table>
</body>
</html>
";

/// Render the flight listing as a standalone HTML page with one table row per flight.
pub fn render_flights_table(rows: &[FlightListing]) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + rows.len() * 96);
    page.push_str(PAGE_HEAD);

    for row in rows {
        // Writing into a String cannot fail
        let _ = writeln!(
            page,
            "    <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.flight_id,
            row.flight_date.format(FLIGHT_DATE_FORMAT),
            html_escape(&row.planet_name),
            row.planet_id
        );
    }

    page.push_str(PAGE_TAIL);
    page
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn listing(flight_id: i32, planet_name: &str) -> FlightListing {
        FlightListing {
            flight_id,
            flight_date: NaiveDate::from_ymd_opt(2084, 6, 12).unwrap(),
            planet_name: planet_name.to_string(),
            planet_id: 1,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Mars"), "Mars");
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_single_row() {
        let page = render_flights_table(&[listing(10, "Mars")]);
        assert!(page.starts_with("<html>"));
        assert!(page.contains("<tr><th>Flight ID</th><th>Date</th><th>Planet</th><th>Planet ID</th></tr>"));
        assert!(page.contains("<tr><td>10</td><td>2084-06-12</td><td>Mars</td><td>1</td></tr>"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_render_empty_listing_has_header_only() {
        let page = render_flights_table(&[]);
        assert!(page.contains("<th>Flight ID</th>"));
        assert!(!page.contains("<td>"));
    }

    #[test]
    fn test_planet_names_are_escaped() {
        let page = render_flights_table(&[listing(7, "<script>alert('Boo!')</script>")]);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(&#39;Boo!&#39;)&lt;/script&gt;"));
    }
}
