use std::str::FromStr;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use bambooflow_booking::{BookingKind, MonthCalendar};
use bambooflow_farmer::FarmerRecord;
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    auth::AuthFarmer,
    routes::AppState,
    template::{Template, filters},
};

/// `?month=2026-10&kind=pickup`, both optional.
#[derive(Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
    pub kind: Option<String>,
}

impl CalendarQuery {
    pub fn month_or(&self, today: time::Date) -> (i32, time::Month) {
        self.month
            .as_deref()
            .and_then(bambooflow_shared::parse_year_month)
            .unwrap_or((today.year(), today.month()))
    }

    pub fn kind(&self) -> Option<BookingKind> {
        self.kind.as_deref().and_then(|k| BookingKind::from_str(k).ok())
    }
}

#[derive(askama::Template)]
#[template(path = "farmer/calendar.html")]
pub struct CalendarTemplate {
    pub current_page: &'static str,
    pub farmer: FarmerRecord,
    pub kinds: &'static [BookingKind],
    pub calendar: MonthCalendar,
}

/// Slot availability per day, with the farmer's own bookings listed.
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    auth: AuthFarmer,
    Query(query): Query<CalendarQuery>,
) -> Response {
    let farmer = match super::load_farmer(&app, &template, jar, &auth).await {
        Ok(farmer) => farmer,
        Err(response) => return response,
    };

    let today = bambooflow_shared::today();
    let (year, month) = query.month_or(today);

    let calendar = crate::try_page_response!(
        app.bookings
            .month(year, month, query.kind(), Some(&farmer.id), today),
        template
    );

    template.render(CalendarTemplate {
        current_page: "calendar",
        farmer,
        kinds: BookingKind::VARIANTS,
        calendar,
    })
}
