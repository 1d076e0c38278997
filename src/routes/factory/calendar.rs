use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use bambooflow_booking::{BookingKind, MonthCalendar};
use strum::VariantArray;

use crate::{
    auth::AuthFactory,
    routes::{AppState, farmer::calendar::CalendarQuery},
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "factory/calendar.html")]
pub struct CalendarTemplate {
    pub current_page: &'static str,
    pub kinds: &'static [BookingKind],
    pub calendar: MonthCalendar,
}

/// Load per day over all farmers.
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthFactory,
    Query(query): Query<CalendarQuery>,
) -> Response {
    let today = bambooflow_shared::today();
    let (year, month) = query.month_or(today);

    let calendar = crate::try_page_response!(
        app.bookings.month(year, month, query.kind(), None, today),
        template
    );

    template.render(CalendarTemplate {
        current_page: "calendar",
        kinds: BookingKind::VARIANTS,
        calendar,
    })
}
