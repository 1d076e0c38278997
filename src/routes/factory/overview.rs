use axum::{extract::State, response::Response};
use bambooflow_booking::{Booking, BookingFilter, BookingStatus};

use crate::{
    auth::AuthFactory,
    routes::AppState,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "factory/overview.html")]
pub struct OverviewTemplate {
    pub current_page: &'static str,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub rejected: usize,
    pub today_queue: Vec<Booking>,
    pub upcoming: usize,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthFactory,
) -> Response {
    let today = bambooflow_shared::today();
    let counts = app.bookings.count_by_status().await;
    let count = |status: BookingStatus| counts.get(&status).copied().unwrap_or_default();

    let today_queue = app
        .bookings
        .list(&BookingFilter {
            date: Some(today),
            ..Default::default()
        })
        .await
        .into_iter()
        .filter(|b| b.status.is_active())
        .collect();

    let upcoming = app.bookings.upcoming(None, today).await.len();

    template.render(OverviewTemplate {
        current_page: "overview",
        pending: count(BookingStatus::Pending),
        confirmed: count(BookingStatus::Confirmed),
        completed: count(BookingStatus::Completed),
        rejected: count(BookingStatus::Rejected),
        today_queue,
        upcoming,
    })
}
