use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use bambooflow_session::{Event, Role, Screen};
use serde::Deserialize;

use crate::{
    auth::{CurrentSession, removal_cookie, store_session},
    routes::AppState,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub role: Role,
    pub username: Option<String>,
    pub error_message: Option<String>,
}

/// Credential form for factory and admin, "Sign in with LINE" for farmers.
pub async fn page(template: Template, CurrentSession(session): CurrentSession) -> Response {
    let Some(session) = session else {
        return Redirect::to("/").into_response();
    };

    match session.screen() {
        Screen::Login(role) => template.render(LoginTemplate {
            role,
            username: None,
            error_message: None,
        }),
        screen => Redirect::to(screen.path()).into_response(),
    }
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub username: String,
    pub password: String,
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    CurrentSession(session): CurrentSession,
    Form(input): Form<ActionInput>,
) -> Response {
    let Some(session) = session else {
        return Redirect::to("/").into_response();
    };

    let Screen::Login(role) = session.screen() else {
        return Redirect::to(session.screen().path()).into_response();
    };

    if let Err(err) = app
        .config
        .credentials
        .verify(role, &input.username, &input.password)
    {
        tracing::info!(role = %role, "credential login rejected");

        return template.render(LoginTemplate {
            role,
            username: Some(input.username),
            error_message: template.user_message(&err),
        });
    }

    let session = session.apply(Event::CredentialsAccepted(role));

    tracing::info!(role = %role, "signed in with credentials");

    let jar = match store_session(jar, &app.config.jwt, &session) {
        Ok(jar) => jar,
        Err(response) => return response,
    };

    (jar, Redirect::to(session.screen().path())).into_response()
}

/// Drops the session cookie and returns to a bare `/`. Farmer records stay.
pub async fn logout(jar: CookieJar, CurrentSession(session): CurrentSession) -> impl IntoResponse {
    if let Some(session) = session {
        tracing::info!(role = ?session.role, "signed out");
    }

    (jar.remove(removal_cookie()), Redirect::to("/"))
}
