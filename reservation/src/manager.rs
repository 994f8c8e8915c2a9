use crate::{ReservationManager, Rsvp};
use abi::{CustomerId, DbConfig, Error, Reservation, ReservationId, Validator};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::{debug, info, warn};

#[async_trait]
impl Rsvp for ReservationManager {
    async fn reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Reservation>, Error> {
        debug!(customer_id, "loading reservations for customer");
        let rsvps = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, customer_id, num_guests, start_at, notes
            FROM reservations
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rsvps)
    }

    async fn save(&self, rsvp: &mut Reservation) -> Result<(), Error> {
        rsvp.validate()?;

        match rsvp.id() {
            None => {
                let id: ReservationId = sqlx::query(
                    r#"
                    INSERT INTO reservations (customer_id, num_guests, start_at, notes)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(rsvp.customer_id())
                .bind(rsvp.num_guests())
                .bind(rsvp.start_at())
                .bind(rsvp.notes())
                .fetch_one(&self.pool)
                .await?
                .get(0);
                rsvp.assign_id(id)?;
                info!(id, customer_id = ?rsvp.customer_id(), "reservation created");
            }
            Some(id) => {
                let ret = sqlx::query(
                    r#"
                    UPDATE reservations
                    SET customer_id = $1, num_guests = $2, start_at = $3, notes = $4
                    WHERE id = $5
                    "#,
                )
                .bind(rsvp.customer_id())
                .bind(rsvp.num_guests())
                .bind(rsvp.start_at())
                .bind(rsvp.notes())
                .bind(id)
                .execute(&self.pool)
                .await?;
                if ret.rows_affected() == 0 {
                    warn!(id, "update matched no reservation");
                } else {
                    debug!(id, "reservation updated");
                }
            }
        }
        Ok(())
    }
}

impl ReservationManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_config(config: &DbConfig) -> Result<Self, Error> {
        let pool = PgPoolOptions::default()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await?;
        Ok(Self::new(pool))
    }
}
