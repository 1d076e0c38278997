use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bambooflow_booking::{Booking, BookingAction, BookingFilter, BookingKind, BookingStatus};
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    auth::AuthFactory,
    routes::AppState,
    template::{NotFoundTemplate, ServerTemplate, Template, filters},
};

#[derive(Default, Deserialize)]
pub struct QueueQuery {
    pub status: Option<String>,
    pub kind: Option<String>,
}

impl QueueQuery {
    fn filter(&self) -> BookingFilter {
        BookingFilter {
            status: self
                .status
                .as_deref()
                .and_then(|s| BookingStatus::from_str(s).ok()),
            kind: self
                .kind
                .as_deref()
                .and_then(|k| BookingKind::from_str(k).ok()),
            ..Default::default()
        }
    }
}

#[derive(askama::Template)]
#[template(path = "factory/bookings.html")]
pub struct BookingsTemplate {
    pub current_page: &'static str,
    pub statuses: &'static [BookingStatus],
    pub kinds: &'static [BookingKind],
    pub status: Option<BookingStatus>,
    pub kind: Option<BookingKind>,
    pub bookings: Vec<Booking>,
    pub error_message: Option<String>,
}

async fn render(
    template: &Template,
    app: &AppState,
    query: QueueQuery,
    error_message: Option<String>,
) -> Response {
    let filter = query.filter();
    let bookings = app.bookings.list(&filter).await;

    template.render(BookingsTemplate {
        current_page: "bookings",
        statuses: BookingStatus::VARIANTS,
        kinds: BookingKind::VARIANTS,
        status: filter.status,
        kind: filter.kind,
        bookings,
        error_message,
    })
}

/// Every booking from every farmer, filterable by status and kind.
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthFactory,
    Query(query): Query<QueueQuery>,
) -> Response {
    render(&template, &app, query, None).await
}

/// `POST /factory/bookings/{id}/{confirm|complete|reject}`
pub async fn action(
    template: Template,
    State(app): State<AppState>,
    AuthFactory(session): AuthFactory,
    Path((id, action)): Path<(String, String)>,
) -> Response {
    let Ok(action) = BookingAction::from_str(&action) else {
        return template.render_status(StatusCode::NOT_FOUND, NotFoundTemplate);
    };

    match app.bookings.transition(&id, action).await {
        Ok(booking) => {
            tracing::info!(
                booking_id = %booking.id,
                role = ?session.role,
                action = %action,
                "factory updated booking"
            );

            Redirect::to("/factory/bookings").into_response()
        }
        Err(bambooflow_shared::Error::NotFound(_)) => {
            template.render_status(StatusCode::NOT_FOUND, NotFoundTemplate)
        }
        Err(err) => match template.user_message(&err) {
            Some(message) => render(&template, &app, QueueQuery::default(), Some(message)).await,
            _ => template.render_status(StatusCode::INTERNAL_SERVER_ERROR, ServerTemplate),
        },
    }
}
