use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bambooflow_farmer::{FarmerRecord, FarmerStatus};
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    auth::AuthAdmin,
    routes::AppState,
    template::{NotFoundTemplate, ServerTemplate, Template, filters},
};

#[derive(Deserialize)]
pub struct FarmersQuery {
    pub status: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "admin/farmers.html")]
pub struct FarmersTemplate {
    pub current_page: &'static str,
    pub statuses: &'static [FarmerStatus],
    pub status: Option<FarmerStatus>,
    pub farmers: Vec<FarmerRecord>,
}

/// Registration queue. Newest registrations first.
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Query(query): Query<FarmersQuery>,
) -> Response {
    let status = query
        .status
        .as_deref()
        .and_then(|s| FarmerStatus::from_str(s).ok());

    let mut farmers = crate::try_page_response!(app.farmer_command.list(), template);
    farmers.retain(|f| status.is_none_or(|s| f.status == s));
    farmers.reverse();

    template.render(FarmersTemplate {
        current_page: "farmers",
        statuses: FarmerStatus::VARIANTS,
        status,
        farmers,
    })
}

fn review_response(template: Template, result: bambooflow_shared::Result<FarmerRecord>) -> Response {
    match result {
        Ok(record) => {
            tracing::info!(farmer_id = %record.id, status = %record.status, "farmer reviewed");

            Redirect::to("/admin/farmers").into_response()
        }
        Err(bambooflow_shared::Error::NotFound(_)) => {
            template.render_status(StatusCode::NOT_FOUND, NotFoundTemplate)
        }
        Err(err) => {
            tracing::error!("{err}");

            template.render_status(StatusCode::INTERNAL_SERVER_ERROR, ServerTemplate)
        }
    }
}

pub async fn approve(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
) -> Response {
    review_response(template, app.farmer_command.approve(&id).await)
}

pub async fn reject(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
) -> Response {
    review_response(template, app.farmer_command.reject(&id).await)
}
