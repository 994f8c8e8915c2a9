use chrono::{Datelike, NaiveDateTime};

use crate::Error;

mod reservation;

pub use reservation::{Reservation, ReservationInput};

/// Accepted input format for a reservation's start time, e.g. `2024-03-01 06:30 PM`.
pub const START_AT_FORMAT: &str = "%Y-%m-%d %I:%M %p";

pub fn parse_start_at(s: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(s.trim(), START_AT_FORMAT)
        .map_err(|_| Error::bad_request(format!("Invalid date: {:?}", s)))
}

/// Render a start time as `March 1st 2024, 6:30 pm`.
pub fn format_start_at(dt: &NaiveDateTime) -> String {
    let day = dt.day();
    format!(
        "{} {}{} {}",
        dt.format("%B"),
        day,
        ordinal_suffix(day),
        dt.format("%Y, %-I:%M %P")
    )
}

fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
