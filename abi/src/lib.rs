mod config;
mod error;
mod types;

pub use config::{Config, DbConfig};
pub use error::Error;
pub use types::*;

pub type ReservationId = i64;
pub type CustomerId = i64;

pub trait Validator {
    fn validate(&self) -> Result<(), Error>;
}
