use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("sqlx error: {0}")]
    DbError(sqlx::Error),

    #[error("Failed to read configuration file")]
    ConfigReadError,

    #[error("Failed to parse configuration file")]
    ConfigParseError,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid reservation id {0}")]
    InvalidReservationId(i64),
}

impl Error {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // sqlx errors carry no comparable payload, so match on the kind only
            (Self::DbError(_), Self::DbError(_)) => true,
            (Self::ConfigReadError, Self::ConfigReadError) => true,
            (Self::ConfigParseError, Self::ConfigParseError) => true,
            (Self::BadRequest(v1), Self::BadRequest(v2)) => v1 == v2,
            (Self::InvalidReservationId(v1), Self::InvalidReservationId(v2)) => v1 == v2,
            _ => false,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Error::DbError(e)
    }
}
