mod helpers;

use axum::http::StatusCode;
use bambooflow_booking::{BookingFilter, BookingStatus};
use helpers::{TestApp, body_string, location, setup_test_app};

async fn pending_bookings(app: &TestApp) -> Vec<String> {
    app.state
        .bookings
        .list(&BookingFilter {
            status: Some(BookingStatus::Pending),
            ..Default::default()
        })
        .await
        .into_iter()
        .map(|b| b.id)
        .collect()
}

#[tokio::test]
async fn test_confirm_then_complete() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("role=factory&action=direct").await;
    let id = pending_bookings(&app).await[0].to_owned();

    let response = app
        .post(&format!("/factory/bookings/{id}/confirm"), Some(&cookie), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/factory/bookings");
    assert_eq!(
        app.state.bookings.find(&id).await.map(|b| b.status),
        Some(BookingStatus::Confirmed)
    );

    let response = app
        .post(&format!("/factory/bookings/{id}/complete"), Some(&cookie), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        app.state.bookings.find(&id).await.map(|b| b.status),
        Some(BookingStatus::Completed)
    );

    Ok(())
}

#[tokio::test]
async fn test_invalid_transition() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("role=factory&action=direct").await;
    let id = pending_bookings(&app).await[0].to_owned();

    let response = app
        .post(&format!("/factory/bookings/{id}/complete"), Some(&cookie), &[])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_string(response)
            .await
            .contains("Cannot complete a pending booking")
    );
    assert_eq!(
        app.state.bookings.find(&id).await.map(|b| b.status),
        Some(BookingStatus::Pending)
    );

    let response = app
        .post(&format!("/factory/bookings/{id}/archive"), Some(&cookie), &[])
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post("/factory/bookings/missing/confirm", Some(&cookie), &[])
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_farmer_cannot_act_as_factory() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = helpers::register_farmer(&app).await;
    let id = pending_bookings(&app).await[0].to_owned();

    let response = app
        .post(&format!("/factory/bookings/{id}/confirm"), Some(&cookie), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(
        app.state.bookings.find(&id).await.map(|b| b.status),
        Some(BookingStatus::Pending)
    );

    Ok(())
}

#[tokio::test]
async fn test_factory_pages() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("role=factory&action=direct").await;

    for uri in [
        "/factory",
        "/factory/bookings",
        "/factory/bookings?status=pending&kind=pickup",
        "/factory/calendar",
        "/factory/calendar?month=2026-12&kind=cutting",
    ] {
        let response = app.get(uri, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    Ok(())
}
