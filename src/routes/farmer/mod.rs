use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use bambooflow_farmer::FarmerRecord;
use bambooflow_session::Event;

use crate::{
    auth::{AuthFarmer, removal_cookie, store_session},
    routes::AppState,
    template::{ServerTemplate, Template},
};

pub mod bookings;
pub mod calendar;
pub mod knowledge;
pub mod overview;
pub mod profile;

/// Record behind the session. A session pointing at a record that no longer
/// exists (storage cleared) is dropped so the visitor starts over, and one
/// whose record is no longer approved moves to the pending or rejected page.
pub(crate) async fn load_farmer(
    app: &AppState,
    template: &Template,
    jar: CookieJar,
    auth: &AuthFarmer,
) -> Result<FarmerRecord, Response> {
    match app.farmer_command.load(&auth.farmer_id).await {
        Ok(record) if record.approved => Ok(record),
        Ok(record) => {
            let session = auth
                .session
                .clone()
                .apply(Event::StandingChanged(record.standing()));

            tracing::info!(
                farmer_id = %record.id,
                status = %record.status,
                "farmer session no longer approved"
            );

            let jar = store_session(jar, &app.config.jwt, &session)?;

            Err((jar, Redirect::to(session.screen().path())).into_response())
        }
        Err(bambooflow_shared::Error::NotFound(_)) => {
            tracing::warn!(farmer_id = %auth.farmer_id, "session farmer no longer exists");

            Err((jar.remove(removal_cookie()), Redirect::to("/")).into_response())
        }
        Err(err) => {
            tracing::error!("{err}");

            Err(template.render_status(
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                ServerTemplate,
            ))
        }
    }
}
