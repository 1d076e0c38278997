use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use bambooflow_farmer::{FarmerRecord, ProfileInput};
use serde::Deserialize;

use crate::{
    auth::AuthFarmer,
    routes::AppState,
    template::{ServerTemplate, Template, filters},
};

#[derive(Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub farm_area_rai: String,
}

impl ProfileForm {
    fn from_record(record: &FarmerRecord) -> Self {
        let farm_area_rai = format!("{:.2}", record.farm_area_rai)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_owned();

        Self {
            first_name: record.first_name.to_owned(),
            last_name: record.last_name.to_owned(),
            phone: record.phone.to_owned(),
            address: record.address.to_owned(),
            province: record.province.to_owned(),
            farm_area_rai,
        }
    }
}

#[derive(askama::Template)]
#[template(path = "farmer/profile.html")]
pub struct ProfileTemplate {
    pub current_page: &'static str,
    pub farmer: FarmerRecord,
    pub form: ProfileForm,
    pub saved: bool,
    pub error_message: Option<String>,
}

#[derive(Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub saved: bool,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    auth: AuthFarmer,
    Query(query): Query<ProfileQuery>,
) -> Response {
    let farmer = match super::load_farmer(&app, &template, jar, &auth).await {
        Ok(farmer) => farmer,
        Err(response) => return response,
    };

    template.render(ProfileTemplate {
        current_page: "profile",
        form: ProfileForm::from_record(&farmer),
        farmer,
        saved: query.saved,
        error_message: None,
    })
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    auth: AuthFarmer,
    Form(form): Form<ProfileForm>,
) -> Response {
    let farmer = match super::load_farmer(&app, &template, jar, &auth).await {
        Ok(farmer) => farmer,
        Err(response) => return response,
    };

    let input = ProfileInput {
        first_name: form.first_name.to_owned(),
        last_name: form.last_name.to_owned(),
        phone: form.phone.to_owned(),
        address: form.address.to_owned(),
        province: form.province.to_owned(),
        farm_area_rai: form.farm_area_rai.to_owned(),
    };

    match app.farmer_command.update_profile(&farmer.id, input).await {
        Ok(_) => Redirect::to("/farmer/profile?saved=true").into_response(),
        Err(err) => match template.user_message(&err) {
            Some(message) => template.render(ProfileTemplate {
                current_page: "profile",
                farmer,
                form,
                saved: false,
                error_message: Some(message),
            }),
            _ => template.render_status(
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                ServerTemplate,
            ),
        },
    }
}
