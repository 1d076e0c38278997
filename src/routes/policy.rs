use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use bambooflow_content::{PolicyDocument, PolicyKind};

use crate::{
    routes::AppState,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "policy.html")]
pub struct PolicyTemplate {
    pub document: PolicyDocument,
}

async fn render(template: Template, app: AppState, kind: PolicyKind) -> Response {
    let document = crate::try_page_response!(app.policies.get(kind), template);

    template.render(PolicyTemplate { document })
}

pub async fn privacy(template: Template, State(app): State<AppState>) -> Response {
    render(template, app, PolicyKind::Privacy).await
}

pub async fn terms(template: Template, State(app): State<AppState>) -> Response {
    render(template, app, PolicyKind::Terms).await
}
