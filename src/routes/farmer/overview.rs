use axum::{extract::State, response::Response};
use axum_extra::extract::CookieJar;
use bambooflow_booking::Booking;
use bambooflow_content::Article;
use bambooflow_farmer::FarmerRecord;

use crate::{
    auth::AuthFarmer,
    routes::AppState,
    template::{Template, filters},
};

const LATEST_ARTICLES: usize = 3;

#[derive(askama::Template)]
#[template(path = "farmer/overview.html")]
pub struct OverviewTemplate {
    pub current_page: &'static str,
    pub farmer: FarmerRecord,
    pub upcoming: Vec<Booking>,
    pub articles: Vec<Article>,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    auth: AuthFarmer,
) -> Response {
    let farmer = match super::load_farmer(&app, &template, jar, &auth).await {
        Ok(farmer) => farmer,
        Err(response) => return response,
    };

    let upcoming = app
        .bookings
        .upcoming(Some(&farmer.id), bambooflow_shared::today())
        .await;

    let mut articles = app.articles.list(None, false).await;
    articles.truncate(LATEST_ARTICLES);

    template.render(OverviewTemplate {
        current_page: "overview",
        farmer,
        upcoming,
        articles,
    })
}
