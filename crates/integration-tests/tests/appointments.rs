//! Appointment operations and the availability lookup.

use chrono::NaiveDate;
use serde_json::json;

use clipjoint_core::{AppointmentId, BarberShopId};
use clipjoint_integration_tests::TestBackend;

#[tokio::test]
async fn list_resolves_payload_unchanged() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    let appointments = client.appointments().await.expect("list appointments");

    assert_eq!(
        appointments,
        json!([{"_id": "appt-1", "barbershop": "shop-1", "time": "09:00"}])
    );
}

#[tokio::test]
async fn add_forwards_payload_and_resolves_response() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    let data = json!({"barbershop": "shop-1", "time": "10:30"});
    let created = client.add_appointment(&data).await.expect("add");

    assert_eq!(created.get("time"), Some(&json!("10:30")));
    assert_eq!(created.get("_id"), Some(&json!("appt-2")));
}

#[tokio::test]
async fn get_and_delete_target_the_resource_path() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();
    let id = AppointmentId::new("appt-7");

    client.appointment(&id).await.expect("get");
    let deleted = client.delete_appointment(&id).await.expect("delete");

    assert_eq!(deleted, json!({"_id": "appt-7", "deleted": true}));

    let hits = backend.hits();
    assert!(
        hits.iter()
            .any(|hit| hit.method == "GET" && hit.path == "/api/appointment/appt-7")
    );
    assert!(
        hits.iter()
            .any(|hit| hit.method == "DELETE" && hit.path == "/api/appointment/appt-7")
    );
}

#[tokio::test]
async fn available_times_sends_date_as_query_parameter() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let slots = client
        .available_times(&BarberShopId::new("shop-1"), date)
        .await
        .expect("available times");

    // Payload resolves unchanged; the stub echoes the date it received.
    assert_eq!(slots.get("date"), Some(&json!("2024-01-01")));
    assert_eq!(slots.get("times"), Some(&json!(["09:00", "09:30", "10:00"])));

    let hit = backend
        .hits()
        .into_iter()
        .find(|hit| hit.path == "/api/available-times/shop-1")
        .expect("availability request recorded");
    assert_eq!(hit.method, "GET");
    assert_eq!(hit.query.as_deref(), Some("date=2024-01-01"));
}
