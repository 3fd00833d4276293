//! Barbershop commands.

use thiserror::Error;

use clipjoint_client::{ApiError, BookingClient};
use clipjoint_core::BarberShopId;

use crate::commands::{emit, parse_payload};

/// Errors that can occur during barbershop commands.
#[derive(Debug, Error)]
pub enum ShopCommandError {
    /// The `--data` argument is not valid JSON.
    #[error("Invalid --data payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// The client operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// List all barbershops.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(client: &BookingClient) -> Result<(), ShopCommandError> {
    emit(&client.barber_shops().await?);
    Ok(())
}

/// Fetch one barbershop by id.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn get(client: &BookingClient, id: &str) -> Result<(), ShopCommandError> {
    let id = BarberShopId::from(id);
    emit(&client.barber_shop(&id).await?);
    Ok(())
}

/// Create a barbershop.
///
/// # Errors
///
/// Returns an error if the payload is not JSON or the request fails.
pub async fn add(client: &BookingClient, data: &str) -> Result<(), ShopCommandError> {
    let shop = parse_payload(data)?;
    emit(&client.add_barber_shop(&shop).await?);
    Ok(())
}
