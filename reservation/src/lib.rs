mod manager;
mod memory;

use abi::{CustomerId, Error, Reservation};
use async_trait::async_trait;
use sqlx::PgPool;

pub use memory::MemoryRsvp;

#[derive(Debug, Clone)]
pub struct ReservationManager {
    pool: PgPool,
}

#[async_trait]
pub trait Rsvp {
    /// all reservations of a customer, in the order the store returns them
    async fn reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Reservation>, Error>;

    /// insert the reservation if it has no id yet, otherwise update its row.
    /// On insert the new id is attached to `rsvp`.
    async fn save(&self, rsvp: &mut Reservation) -> Result<(), Error>;
}
