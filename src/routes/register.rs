use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use bambooflow_content::{PolicyDocument, PolicyKind};
use bambooflow_farmer::RegisterInput;
use bambooflow_session::{Event, LineProfile, Screen, Session};
use serde::Deserialize;

use crate::{
    auth::{CurrentSession, store_session},
    routes::AppState,
    template::{Template, filters},
};

#[derive(Default, Deserialize)]
pub struct RegisterForm {
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
    pub accept_privacy: Option<String>,
    pub accept_terms: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub profile: Option<LineProfile>,
    pub form: RegisterForm,
    pub privacy: PolicyDocument,
    pub terms: PolicyDocument,
    pub error_message: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "register-pending.html")]
pub struct PendingTemplate {
    pub profile: Option<LineProfile>,
}

#[derive(askama::Template)]
#[template(path = "register-rejected.html")]
pub struct RejectedTemplate {
    pub profile: Option<LineProfile>,
}

/// Sessions that do not belong on `screen` are sent where they belong.
fn expect_screen(session: Option<Session>, screen: Screen) -> Result<Session, Response> {
    match session {
        Some(session) if session.screen() == screen => Ok(session),
        Some(session) => Err(Redirect::to(session.screen().path()).into_response()),
        _ => Err(Redirect::to("/").into_response()),
    }
}

async fn render_form(
    template: &Template,
    app: &AppState,
    session: Session,
    form: RegisterForm,
    error_message: Option<String>,
) -> Response {
    let privacy = crate::try_page_response!(app.policies.get(PolicyKind::Privacy), template);
    let terms = crate::try_page_response!(app.policies.get(PolicyKind::Terms), template);

    template.render(RegisterTemplate {
        profile: session.line_profile,
        form,
        privacy,
        terms,
        error_message,
    })
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Response {
    let session = match expect_screen(session, Screen::Registration) {
        Ok(session) => session,
        Err(response) => return response,
    };

    render_form(&template, &app, session, RegisterForm::default(), None).await
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    CurrentSession(session): CurrentSession,
    Form(form): Form<RegisterForm>,
) -> Response {
    let session = match expect_screen(session, Screen::Registration) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let input = RegisterInput {
        line_user_id: session.line_profile.as_ref().map(|p| p.user_id.to_owned()),
        first_name: form.first_name.to_owned(),
        last_name: form.last_name.to_owned(),
        phone: form.phone.to_owned(),
        address: form.address.to_owned(),
        province: form.province.to_owned(),
        farm_area_rai: form.farm_area_rai.to_owned(),
        accepted_privacy: form.accept_privacy.is_some(),
        accepted_terms: form.accept_terms.is_some(),
    };

    let record = match app.farmer_command.register(input).await {
        Ok(record) => record,
        Err(err) => {
            let Some(message) = template.user_message(&err) else {
                return template.render_status(
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    crate::template::ServerTemplate,
                );
            };

            return render_form(&template, &app, session, form, Some(message)).await;
        }
    };

    let session = session.apply(Event::RegistrationSubmitted {
        farmer_id: record.id,
        approved: record.approved,
    });

    let jar = match store_session(jar, &app.config.jwt, &session) {
        Ok(jar) => jar,
        Err(response) => return response,
    };

    (jar, Redirect::to(session.screen().path())).into_response()
}

pub async fn pending(template: Template, CurrentSession(session): CurrentSession) -> Response {
    match expect_screen(session, Screen::PendingApproval) {
        Ok(session) => template.render(PendingTemplate {
            profile: session.line_profile,
        }),
        Err(response) => response,
    }
}

pub async fn rejected(template: Template, CurrentSession(session): CurrentSession) -> Response {
    match expect_screen(session, Screen::Rejected) {
        Ok(session) => template.render(RejectedTemplate {
            profile: session.line_profile,
        }),
        Err(response) => response,
    }
}
