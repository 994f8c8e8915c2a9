use std::collections::BTreeMap;

use abi::{CustomerId, Error, Reservation, ReservationId, Validator};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::Rsvp;

/// In-memory stand-in for the reservations table.
///
/// Ids are handed out from 1 upwards like a serial column; rows are kept in
/// id order, which is the order `reservations_for_customer` returns them in.
#[derive(Debug, Default)]
pub struct MemoryRsvp {
    inner: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: ReservationId,
    rows: BTreeMap<ReservationId, Reservation>,
}

impl MemoryRsvp {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of stored rows
    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn get(&self, id: ReservationId) -> Option<Reservation> {
        self.inner.lock().await.rows.get(&id).cloned()
    }
}

#[async_trait]
impl Rsvp for MemoryRsvp {
    async fn reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Reservation>, Error> {
        debug!(customer_id, "loading reservations for customer");
        let table = self.inner.lock().await;
        Ok(table
            .rows
            .values()
            .filter(|r| r.customer_id() == Some(customer_id))
            .cloned()
            .collect())
    }

    async fn save(&self, rsvp: &mut Reservation) -> Result<(), Error> {
        rsvp.validate()?;

        let mut table = self.inner.lock().await;
        match rsvp.id() {
            None => {
                let id = table.last_id + 1;
                rsvp.assign_id(id)?;
                table.last_id = id;
                table.rows.insert(id, rsvp.clone());
                info!(id, customer_id = ?rsvp.customer_id(), "reservation created");
            }
            Some(id) => match table.rows.get_mut(&id) {
                Some(row) => {
                    *row = rsvp.clone();
                    debug!(id, "reservation updated");
                }
                None => warn!(id, "update matched no reservation"),
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abi::ReservationInput;

    fn new_rsvp(customer_id: Option<CustomerId>, num_guests: i32) -> Reservation {
        Reservation::new(ReservationInput {
            customer_id,
            num_guests,
            start_at: "2024-03-01 06:30 PM".to_string(),
            notes: None,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn save_should_insert_and_assign_id() {
        let store = MemoryRsvp::new();
        let mut rsvp = new_rsvp(Some(5), 2);
        store.save(&mut rsvp).await.unwrap();

        assert_eq!(rsvp.id(), Some(1));
        assert_eq!(store.len().await, 1);

        let row = store.get(1).await.unwrap();
        assert_eq!(row.customer_id(), Some(5));
        assert_eq!(row.num_guests(), 2);
        assert_eq!(row.formatted_start_at(), "March 1st 2024, 6:30 pm");
        assert_eq!(row.notes(), "");
    }

    #[tokio::test]
    async fn identical_new_reservations_should_create_separate_rows() {
        let store = MemoryRsvp::new();
        let mut r1 = new_rsvp(Some(5), 2);
        let mut r2 = r1.clone();
        store.save(&mut r1).await.unwrap();
        store.save(&mut r2).await.unwrap();

        assert_eq!(r1.id(), Some(1));
        assert_eq!(r2.id(), Some(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn save_should_update_persisted_reservation() {
        let store = MemoryRsvp::new();
        let mut rsvp = new_rsvp(Some(5), 2);
        store.save(&mut rsvp).await.unwrap();

        rsvp.set_num_guests(4).unwrap();
        rsvp.set_start_at("2024-03-02 12:00 PM").unwrap();
        rsvp.set_notes(Some("patio"));
        store.save(&mut rsvp).await.unwrap();
        store.save(&mut rsvp).await.unwrap();

        assert_eq!(rsvp.id(), Some(1));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(1).await.unwrap(), rsvp);
    }

    #[tokio::test]
    async fn update_of_missing_row_should_not_insert() {
        let store = MemoryRsvp::new();
        let mut rsvp = Reservation::new(ReservationInput {
            id: Some(10),
            customer_id: Some(5),
            num_guests: 2,
            start_at: "2024-03-01 06:30 PM".to_string(),
            notes: None,
        })
        .unwrap();
        store.save(&mut rsvp).await.unwrap();

        assert!(store.is_empty().await);
        assert_eq!(rsvp.id(), Some(10));
    }

    #[tokio::test]
    async fn save_without_customer_should_fail() {
        let store = MemoryRsvp::new();
        let mut rsvp = new_rsvp(None, 2);
        let err = store.save(&mut rsvp).await.unwrap_err();

        assert_eq!(
            err,
            Error::bad_request("Reservation must belong to a customer")
        );
        assert_eq!(rsvp.id(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn reservations_for_customer_should_work() {
        let store = MemoryRsvp::new();
        for (customer_id, num_guests) in [(5, 2), (6, 3), (5, 4)] {
            store
                .save(&mut new_rsvp(Some(customer_id), num_guests))
                .await
                .unwrap();
        }

        let rsvps = store.reservations_for_customer(5).await.unwrap();
        let got: Vec<_> = rsvps.iter().map(|r| (r.id(), r.num_guests())).collect();
        assert_eq!(got, vec![(Some(1), 2), (Some(3), 4)]);

        let rsvps = store.reservations_for_customer(404).await.unwrap();
        assert!(rsvps.is_empty());
    }
}
