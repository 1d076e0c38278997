use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use bambooflow_session::{Entry, EntryQuery, Role, Screen, resolve as resolve_entry};
use serde::Deserialize;
use strum::VariantArray;
use ulid::Ulid;

use crate::{
    auth::{CurrentSession, store_session},
    routes::AppState,
    template::{ServerTemplate, Template, filters},
};

#[derive(askama::Template)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub target: String,
    pub delay_secs: u64,
}

#[derive(askama::Template)]
#[template(path = "role-selector.html")]
pub struct RoleSelectorTemplate {
    pub roles: &'static [Role],
}

impl Default for RoleSelectorTemplate {
    fn default() -> Self {
        Self {
            roles: Role::VARIANTS,
        }
    }
}

/// Entry point. A visitor with a session and no entry parameters lands on
/// their screen; anyone else sees the loading page, which moves on to
/// `/resolve` with the same query once its timer fires.
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    CurrentSession(session): CurrentSession,
    RawQuery(query): RawQuery,
) -> Response {
    let query = query.filter(|q| !q.is_empty());

    if let (Some(session), None) = (&session, &query) {
        return match session.screen() {
            Screen::Loading | Screen::RoleSelector => {
                template.render(RoleSelectorTemplate::default())
            }
            screen => Redirect::to(screen.path()).into_response(),
        };
    }

    let target = match query {
        Some(query) => format!("/resolve?{query}"),
        _ => "/resolve".to_owned(),
    };

    template.render(LoadingTemplate {
        target,
        delay_secs: app.config.resolver.loading_delay_secs,
    })
}

/// Runs the role resolver once and stores the resulting session.
pub async fn resolve(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    Query(query): Query<EntryQuery>,
) -> Response {
    let entry = Entry::parse(&query);

    let standing = if entry.needs_farmer_lookup() {
        match app.farmer_command.repository.standing().await {
            Ok(standing) => standing,
            Err(err) => {
                tracing::error!("{err}");

                return template.render_status(StatusCode::INTERNAL_SERVER_ERROR, ServerTemplate);
            }
        }
    } else {
        None
    };

    let session = resolve_entry(&entry, &app.config.line, standing);
    let screen = session.screen();

    tracing::info!(
        entry = ?entry,
        role = ?session.role,
        auth_status = ?session.auth_status,
        "entry resolved"
    );

    let jar = match store_session(jar, &app.config.jwt, &session) {
        Ok(jar) => jar,
        Err(response) => return response,
    };

    (jar, Redirect::to(screen.path())).into_response()
}

#[derive(Deserialize)]
pub struct LineAuthorizeQuery {
    pub role: Option<String>,
}

/// Stand-in for the LINE authorize page: hands back a fresh code with the
/// role in `state`, the way the real redirect would.
pub async fn line_authorize(Query(query): Query<LineAuthorizeQuery>) -> Redirect {
    let role = query
        .role
        .as_deref()
        .and_then(Role::from_token)
        .unwrap_or(Role::Farmer);

    Redirect::to(&format!("/?code={}&state={}", Ulid::new(), role.token()))
}
