use std::{
    convert::Infallible,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use bambooflow_session::{Role, Session};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, routes::AppState};

pub const SESSION_COOKIE_NAME: &str = "session";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
    session: Session,
}

pub fn generate_token(config: &JwtConfig, session: &Session) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let sub = match (&session.farmer_id, session.role) {
        (Some(farmer_id), _) => farmer_id.to_owned(),
        (_, Some(role)) => role.token().to_owned(),
        _ => "anonymous".to_owned(),
    };

    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now.saturating_add(config.expiration_days.saturating_mul(24 * 60 * 60)),
        iat: now,
        iss: config.issuer.to_owned(),
        sub,
        session: session.clone(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// `None` for anything that does not verify: bad signature, expired, wrong
/// issuer or audience.
pub fn decode_session(config: &JwtConfig, token: &str) -> Option<Session> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Some(data.claims.session),
        Err(err) => {
            tracing::debug!(err = %err, "ignoring invalid session cookie");
            None
        }
    }
}

pub fn build_cookie<'a>(config: &JwtConfig, session: &Session) -> anyhow::Result<Cookie<'a>> {
    let token = generate_token(config, session)?;

    Ok(Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build())
}

/// Cookie that clears the session on the client.
pub fn removal_cookie<'a>() -> Cookie<'a> {
    Cookie::build(SESSION_COOKIE_NAME).path("/").build()
}

/// Stores `session` in the jar, or answers with the server error page.
pub fn store_session(
    jar: CookieJar,
    config: &JwtConfig,
    session: &Session,
) -> Result<CookieJar, Response> {
    match build_cookie(config, session) {
        Ok(cookie) => Ok(jar.add(cookie)),
        Err(err) => {
            tracing::error!("{err}");

            Err((
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                crate::template::SERVER_ERROR_MESSAGE,
            )
                .into_response())
        }
    }
}

/// Session carried by the request, `None` when there is no valid cookie.
pub struct CurrentSession(pub Option<Session>);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;

        let session = jar
            .get(SESSION_COOKIE_NAME)
            .and_then(|cookie| decode_session(&state.config.jwt, cookie.value()));

        Ok(CurrentSession(session))
    }
}

async fn authenticated_as(
    parts: &mut Parts,
    state: &AppState,
    role: Role,
) -> Result<Session, Redirect> {
    let CurrentSession(session) = CurrentSession::from_request_parts(parts, state)
        .await
        .map_err(|_| Redirect::to("/"))?;

    match session {
        Some(session) if session.is_authenticated_as(role) => Ok(session),
        _ => Err(Redirect::to("/")),
    }
}

pub struct AuthFarmer {
    pub session: Session,
    pub farmer_id: String,
}

impl FromRequestParts<AppState> for AuthFarmer {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = authenticated_as(parts, state, Role::Farmer).await?;

        let Some(farmer_id) = session.farmer_id.to_owned() else {
            return Err(Redirect::to("/"));
        };

        Ok(AuthFarmer { session, farmer_id })
    }
}

pub struct AuthFactory(pub Session);

impl FromRequestParts<AppState> for AuthFactory {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuthFactory(
            authenticated_as(parts, state, Role::Factory).await?,
        ))
    }
}

pub struct AuthAdmin(pub Session);

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuthAdmin(authenticated_as(parts, state, Role::Admin).await?))
    }
}

#[cfg(test)]
mod tests {
    use bambooflow_session::Event;

    use super::*;
    use crate::config::Config;

    #[test]
    fn test_token_round_trip() {
        let config = Config::for_tests("sqlite::memory:").jwt;
        let session = Session::default().apply(Event::DirectLogin(Role::Factory));

        let token = generate_token(&config, &session).unwrap();

        assert_eq!(decode_session(&config, &token), Some(session));
    }

    #[test]
    fn test_huge_expiration_saturates() {
        let mut config = Config::for_tests("sqlite::memory:").jwt;
        config.expiration_days = u64::MAX;

        let token = generate_token(&config, &Session::default()).unwrap();
        assert_eq!(decode_session(&config, &token), Some(Session::default()));
    }

    #[test]
    fn test_foreign_token_is_ignored() {
        let config = Config::for_tests("sqlite::memory:").jwt;
        let mut other = config.clone();
        other.secret = "another_secret_key_minimum_32_characters".to_owned();

        let token = generate_token(&other, &Session::default()).unwrap();
        assert_eq!(decode_session(&config, &token), None);

        other = config.clone();
        other.audience = "someone-else".to_owned();
        let token = generate_token(&other, &Session::default()).unwrap();
        assert_eq!(decode_session(&config, &token), None);

        assert_eq!(decode_session(&config, "not-a-jwt"), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let config = Config::for_tests("sqlite::memory:").jwt;
        let cookie = build_cookie(&config, &Session::default()).unwrap();

        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }
}
