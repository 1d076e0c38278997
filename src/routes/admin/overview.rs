use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use bambooflow_farmer::FarmerStatus;

use crate::{
    auth::AuthAdmin,
    routes::AppState,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "admin/overview.html")]
pub struct OverviewTemplate {
    pub current_page: &'static str,
    pub farmers_pending: usize,
    pub farmers_approved: usize,
    pub farmers_rejected: usize,
    pub bookings_active: usize,
    pub bookings_total: usize,
    pub articles_published: usize,
    pub articles_drafts: usize,
    pub species: usize,
    pub pickup_points: usize,
}

pub async fn page(template: Template, State(app): State<AppState>, _auth: AuthAdmin) -> Response {
    let farmers = crate::try_page_response!(app.farmer_command.list(), template);
    let farmer_count =
        |status: FarmerStatus| farmers.iter().filter(|f| f.status == status).count();

    let bookings = app.bookings.count_by_status().await;
    let bookings_active: usize = bookings
        .iter()
        .filter(|(status, _)| status.is_active())
        .map(|(_, count)| count)
        .sum();
    let bookings_total: usize = bookings.values().sum();

    let (articles_published, articles_drafts) = app.articles.counts().await;

    template.render(OverviewTemplate {
        current_page: "overview",
        farmers_pending: farmer_count(FarmerStatus::Pending),
        farmers_approved: farmer_count(FarmerStatus::Approved),
        farmers_rejected: farmer_count(FarmerStatus::NotApproved),
        bookings_active,
        bookings_total,
        articles_published,
        articles_drafts,
        species: app.master_data.species().await.len(),
        pickup_points: app.master_data.pickup_points().await.len(),
    })
}
