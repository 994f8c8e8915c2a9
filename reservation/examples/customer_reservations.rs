use abi::{Config, CustomerId};
use anyhow::Context;
use reservation::{ReservationManager, Rsvp};
use sqlx::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let customer_id: CustomerId = std::env::args()
        .nth(1)
        .context("usage: customer_reservations <customer-id>")?
        .parse()?;

    // DATABASE_URL wins over the config file lookup
    let manager = match std::env::var("DATABASE_URL") {
        Ok(url) => ReservationManager::new(PgPool::connect(&url).await?),
        Err(_) => {
            let filename = Config::locate()?;
            tracing::info!(%filename, "loading config");
            ReservationManager::from_config(&Config::load(&filename)?.db).await?
        }
    };
    let rsvps = manager.reservations_for_customer(customer_id).await?;
    if rsvps.is_empty() {
        println!("no reservations for customer {}", customer_id);
    }
    for rsvp in rsvps {
        println!(
            "#{} {} for {} guests {}",
            rsvp.id().unwrap_or_default(),
            rsvp.formatted_start_at(),
            rsvp.num_guests(),
            rsvp.notes()
        );
    }
    Ok(())
}
