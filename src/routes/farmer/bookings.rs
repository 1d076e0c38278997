use std::str::FromStr;

use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use bambooflow_booking::{Booking, BookingFilter, BookingKind, CreateBookingInput};
use bambooflow_farmer::FarmerRecord;
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    auth::AuthFarmer,
    routes::AppState,
    template::{Template, filters},
};

#[derive(Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub description: String,
}

impl BookingForm {
    fn into_input(self, farmer: &FarmerRecord) -> bambooflow_shared::Result<CreateBookingInput> {
        let Ok(kind) = BookingKind::from_str(&self.kind) else {
            bambooflow_shared::user!("Please choose a booking type");
        };

        let date = bambooflow_shared::parse_iso_date(&self.date)?;

        let Ok(quantity) = self.quantity.trim().parse::<u32>() else {
            bambooflow_shared::user!("Quantity must be a whole number");
        };

        Ok(CreateBookingInput {
            owner_id: farmer.id.to_owned(),
            owner_name: farmer.full_name(),
            kind,
            date,
            quantity,
            description: self.description,
        })
    }
}

#[derive(askama::Template)]
#[template(path = "farmer/bookings.html")]
pub struct BookingsTemplate {
    pub current_page: &'static str,
    pub farmer: FarmerRecord,
    pub kinds: &'static [BookingKind],
    pub form: BookingForm,
    pub min_date: String,
    pub daily_capacity: usize,
    pub bookings: Vec<Booking>,
    pub error_message: Option<String>,
}

/// `?kind=&date=` preselects the form, the calendar links here that way.
#[derive(Deserialize)]
pub struct PageQuery {
    pub kind: Option<String>,
    pub date: Option<String>,
}

async fn render(
    template: &Template,
    app: &AppState,
    farmer: FarmerRecord,
    form: BookingForm,
    error_message: Option<String>,
) -> Response {
    let filter = BookingFilter {
        owner_id: Some(farmer.id.to_owned()),
        ..Default::default()
    };
    let mut bookings = app.bookings.list(&filter).await;
    bookings.reverse();

    let min_date = crate::try_page_response!(
        sync: bambooflow_shared::format_iso_date(bambooflow_shared::today()),
        template
    );

    template.render(BookingsTemplate {
        current_page: "bookings",
        farmer,
        kinds: BookingKind::VARIANTS,
        form,
        min_date,
        daily_capacity: app.bookings.daily_capacity(),
        bookings,
        error_message,
    })
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    auth: AuthFarmer,
    Query(query): Query<PageQuery>,
) -> Response {
    let farmer = match super::load_farmer(&app, &template, jar, &auth).await {
        Ok(farmer) => farmer,
        Err(response) => return response,
    };

    let form = BookingForm {
        kind: query.kind.unwrap_or_default(),
        date: query.date.unwrap_or_default(),
        ..Default::default()
    };

    render(&template, &app, farmer, form, None).await
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    auth: AuthFarmer,
    Form(form): Form<BookingForm>,
) -> Response {
    let farmer = match super::load_farmer(&app, &template, jar, &auth).await {
        Ok(farmer) => farmer,
        Err(response) => return response,
    };

    let submitted = BookingForm {
        kind: form.kind.to_owned(),
        date: form.date.to_owned(),
        quantity: form.quantity.to_owned(),
        description: form.description.to_owned(),
    };

    let result = match form.into_input(&farmer) {
        Ok(input) => app.bookings.create(input, bambooflow_shared::today()).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Redirect::to("/farmer/bookings").into_response(),
        Err(err) => match template.user_message(&err) {
            Some(message) => render(&template, &app, farmer, submitted, Some(message)).await,
            _ => template.render_status(
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                crate::template::ServerTemplate,
            ),
        },
    }
}
