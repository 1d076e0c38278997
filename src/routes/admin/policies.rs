use std::str::FromStr;

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bambooflow_content::{PolicyDocument, PolicyInput, PolicyKind};
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    auth::AuthAdmin,
    routes::AppState,
    template::{NotFoundTemplate, ServerTemplate, Template, filters},
};

#[derive(Deserialize)]
pub struct PolicyForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Deserialize)]
pub struct PolicyQuery {
    #[serde(default)]
    pub saved: bool,
}

#[derive(askama::Template)]
#[template(path = "admin/policy-form.html")]
pub struct PolicyFormTemplate {
    pub current_page: &'static str,
    pub kinds: &'static [PolicyKind],
    pub kind: PolicyKind,
    pub form: PolicyForm,
    pub updated_at: Option<i64>,
    pub saved: bool,
    pub error_message: Option<String>,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(kind): Path<String>,
    Query(query): Query<PolicyQuery>,
) -> Response {
    let kind = crate::try_page_response!(sync opt: PolicyKind::from_str(&kind).ok(), template);

    let (form, updated_at) = match app.policies.get(kind).await {
        Ok(PolicyDocument {
            title,
            body,
            updated_at,
            ..
        }) => (PolicyForm { title, body }, Some(updated_at)),
        Err(bambooflow_shared::Error::NotFound(_)) => (
            PolicyForm {
                title: String::new(),
                body: String::new(),
            },
            None,
        ),
        Err(err) => {
            tracing::error!("{err}");

            return template.render_status(StatusCode::INTERNAL_SERVER_ERROR, ServerTemplate);
        }
    };

    template.render(PolicyFormTemplate {
        current_page: "policies",
        kinds: PolicyKind::VARIANTS,
        kind,
        form,
        updated_at,
        saved: query.saved,
        error_message: None,
    })
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(kind): Path<String>,
    Form(form): Form<PolicyForm>,
) -> Response {
    let Ok(kind) = PolicyKind::from_str(&kind) else {
        return template.render_status(StatusCode::NOT_FOUND, NotFoundTemplate);
    };

    let input = PolicyInput {
        title: form.title.to_owned(),
        body: form.body.to_owned(),
    };

    match app.policies.update(kind, input).await {
        Ok(_) => Redirect::to(&format!("/admin/policies/{kind}?saved=true")).into_response(),
        Err(err) => match template.user_message(&err) {
            Some(message) => template.render(PolicyFormTemplate {
                current_page: "policies",
                kinds: PolicyKind::VARIANTS,
                kind,
                form,
                updated_at: None,
                saved: false,
                error_message: Some(message),
            }),
            _ => template.render_status(StatusCode::INTERNAL_SERVER_ERROR, ServerTemplate),
        },
    }
}
