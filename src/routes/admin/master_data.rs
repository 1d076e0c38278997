use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bambooflow_content::{BambooSpecies, PickupPoint, PickupPointInput, SpeciesInput};
use serde::Deserialize;

use crate::{
    auth::AuthAdmin,
    routes::AppState,
    template::{NotFoundTemplate, ServerTemplate, Template, filters},
};

const PAGE_PATH: &str = "/admin/master-data";

#[derive(askama::Template)]
#[template(path = "admin/master-data.html")]
pub struct MasterDataTemplate {
    pub current_page: &'static str,
    pub species: Vec<BambooSpecies>,
    pub pickup_points: Vec<PickupPoint>,
    pub error_message: Option<String>,
}

async fn render(template: &Template, app: &AppState, error_message: Option<String>) -> Response {
    template.render(MasterDataTemplate {
        current_page: "master_data",
        species: app.master_data.species().await,
        pickup_points: app.master_data.pickup_points().await,
        error_message,
    })
}

/// Back to the page on success, the page with the message inline otherwise.
async fn respond<T>(
    template: Template,
    app: &AppState,
    result: bambooflow_shared::Result<T>,
) -> Response {
    match result {
        Ok(_) => Redirect::to(PAGE_PATH).into_response(),
        Err(bambooflow_shared::Error::NotFound(_)) => {
            template.render_status(StatusCode::NOT_FOUND, NotFoundTemplate)
        }
        Err(err) => match template.user_message(&err) {
            Some(message) => render(&template, app, Some(message)).await,
            _ => template.render_status(StatusCode::INTERNAL_SERVER_ERROR, ServerTemplate),
        },
    }
}

pub async fn page(template: Template, State(app): State<AppState>, _auth: AuthAdmin) -> Response {
    render(&template, &app, None).await
}

#[derive(Deserialize)]
pub struct SpeciesForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub harvest_age_months: String,
}

pub async fn add_species(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Form(form): Form<SpeciesForm>,
) -> Response {
    let result = match form.harvest_age_months.trim().parse::<u16>() {
        Ok(harvest_age_months) => {
            app.master_data
                .add_species(SpeciesInput {
                    name: form.name,
                    harvest_age_months,
                })
                .await
        }
        Err(_) => Err(bambooflow_shared::Error::User(
            "Harvest age must be a whole number of months".to_owned(),
        )),
    };

    respond(template, &app, result).await
}

pub async fn remove_species(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
) -> Response {
    let result = app.master_data.remove_species(&id).await;

    respond(template, &app, result).await
}

#[derive(Deserialize)]
pub struct PickupPointForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub province: String,
}

pub async fn add_pickup_point(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Form(form): Form<PickupPointForm>,
) -> Response {
    let result = app
        .master_data
        .add_pickup_point(PickupPointInput {
            name: form.name,
            province: form.province,
        })
        .await;

    respond(template, &app, result).await
}

pub async fn remove_pickup_point(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
) -> Response {
    let result = app.master_data.remove_pickup_point(&id).await;

    respond(template, &app, result).await
}
