use chrono::NaiveDateTime;
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::{
    error::Error, format_start_at, parse_start_at, CustomerId, ReservationId, Validator,
};

/// Raw reservation fields as they arrive from a form or request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationInput {
    pub id: Option<ReservationId>,
    pub customer_id: Option<CustomerId>,
    pub num_guests: i32,
    pub start_at: String,
    pub notes: Option<String>,
}

/// A reservation for a party.
///
/// Every field goes through its setter, so a live instance always has at
/// least one guest and a valid start time. `customer_id` can be assigned
/// once; `id` is attached by storage on first insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    id: Option<ReservationId>,
    customer_id: Option<CustomerId>,
    num_guests: i32,
    start_at: NaiveDateTime,
    notes: String,
}

impl Reservation {
    pub fn new(input: ReservationInput) -> Result<Self, Error> {
        let start_at = parse_start_at(&input.start_at)?;
        Self::from_parts(
            input.id,
            input.customer_id,
            input.num_guests,
            start_at,
            input.notes,
        )
    }

    /// Build a reservation whose start time is already parsed, e.g. a stored row.
    pub fn from_parts(
        id: Option<ReservationId>,
        customer_id: Option<CustomerId>,
        num_guests: i32,
        start_at: NaiveDateTime,
        notes: Option<String>,
    ) -> Result<Self, Error> {
        if let Some(id) = id {
            if id <= 0 {
                return Err(Error::InvalidReservationId(id));
            }
        }
        let mut rsvp = Self {
            id,
            customer_id: None,
            num_guests: 1,
            start_at,
            notes: String::new(),
        };
        if let Some(customer_id) = customer_id {
            rsvp.set_customer_id(customer_id)?;
        }
        rsvp.set_num_guests(num_guests)?;
        rsvp.set_notes(notes);
        Ok(rsvp)
    }

    pub fn id(&self) -> Option<ReservationId> {
        self.id
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn num_guests(&self) -> i32 {
        self.num_guests
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.start_at
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn formatted_start_at(&self) -> String {
        format_start_at(&self.start_at)
    }

    /// Absent or empty notes are stored as `""`.
    pub fn set_notes<S: Into<String>>(&mut self, notes: Option<S>) {
        self.notes = notes.map(Into::into).unwrap_or_default();
    }

    pub fn set_num_guests(&mut self, num_guests: i32) -> Result<(), Error> {
        if num_guests < 1 {
            return Err(Error::bad_request("Must have at least 1 guest"));
        }
        self.num_guests = num_guests;
        Ok(())
    }

    pub fn set_start_at(&mut self, start_at: &str) -> Result<(), Error> {
        self.start_at = parse_start_at(start_at)?;
        Ok(())
    }

    /// The customer can be set once; any later assignment fails, even with the same id.
    pub fn set_customer_id(&mut self, customer_id: CustomerId) -> Result<(), Error> {
        if self.customer_id.is_some() {
            return Err(Error::bad_request(
                "Customer of a reservation cannot be changed",
            ));
        }
        self.customer_id = Some(customer_id);
        Ok(())
    }

    /// Attach the identity handed out by storage on insert.
    pub fn assign_id(&mut self, id: ReservationId) -> Result<(), Error> {
        if self.id.is_some() || id <= 0 {
            return Err(Error::InvalidReservationId(id));
        }
        self.id = Some(id);
        Ok(())
    }
}

impl Validator for Reservation {
    fn validate(&self) -> Result<(), Error> {
        if self.customer_id.is_none() {
            return Err(Error::bad_request("Reservation must belong to a customer"));
        }
        Ok(())
    }
}

impl FromRow<'_, PgRow> for Reservation {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let id: ReservationId = row.try_get("id")?;
        let customer_id: CustomerId = row.try_get("customer_id")?;
        let num_guests: i32 = row.try_get("num_guests")?;
        let start_at: NaiveDateTime = row.try_get("start_at")?;
        let notes: Option<String> = row.try_get("notes")?;

        Self::from_parts(Some(id), Some(customer_id), num_guests, start_at, notes)
            .map_err(decode_error)
    }
}

/// A stored row that breaks an invariant is a decode failure of that row.
fn decode_error(e: Error) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(e))
}
