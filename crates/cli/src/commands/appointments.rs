//! Appointment commands, including the availability lookup.

use chrono::NaiveDate;
use thiserror::Error;

use clipjoint_client::{ApiError, BookingClient};
use clipjoint_core::{AppointmentId, BarberShopId};

use crate::commands::{emit, parse_payload};

/// Errors that can occur during appointment commands.
#[derive(Debug, Error)]
pub enum AppointmentCommandError {
    /// The `--data` argument is not valid JSON.
    #[error("Invalid --data payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// The client operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// List all appointments.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(client: &BookingClient) -> Result<(), AppointmentCommandError> {
    emit(&client.appointments().await?);
    Ok(())
}

/// Fetch one appointment by id.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn get(client: &BookingClient, id: &str) -> Result<(), AppointmentCommandError> {
    let id = AppointmentId::from(id);
    emit(&client.appointment(&id).await?);
    Ok(())
}

/// Create an appointment.
///
/// # Errors
///
/// Returns an error if the payload is not JSON or the request fails.
pub async fn add(client: &BookingClient, data: &str) -> Result<(), AppointmentCommandError> {
    let appointment = parse_payload(data)?;
    emit(&client.add_appointment(&appointment).await?);
    Ok(())
}

/// Delete an appointment.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn delete(client: &BookingClient, id: &str) -> Result<(), AppointmentCommandError> {
    let id = AppointmentId::from(id);
    emit(&client.delete_appointment(&id).await?);
    Ok(())
}

/// List available slots for a shop on a date.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn available_times(
    client: &BookingClient,
    shop_id: &str,
    date: NaiveDate,
) -> Result<(), AppointmentCommandError> {
    let shop_id = BarberShopId::from(shop_id);
    emit(&client.available_times(&shop_id, date).await?);
    Ok(())
}
