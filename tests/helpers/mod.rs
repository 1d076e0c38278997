//! Test helpers to run the router against a throwaway sqlite file.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use bambooflow::{AppState, Config};
use http_body_util::BodyExt;
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    setup_test_app_with(|_| {}).await
}

pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let path = dir.child("bambooflow.db");
    let url = format!("sqlite:{}", path.display());

    let mut config = Config::for_tests(url.to_owned());
    configure(&mut config);

    let pool = bambooflow::db::create_pool(&url, 1).await?;
    bambooflow::db::migrate(&pool).await?;

    let state = AppState::new(config, pool.clone(), pool).await?;

    Ok(TestApp {
        router: bambooflow::router(state.clone()),
        state,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::get(uri).header(header::ACCEPT_LANGUAGE, "en");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post(
        &self,
        uri: &str,
        cookie: Option<&str>,
        form: &[(&str, &str)],
    ) -> Response<Body> {
        let mut request = Request::post(uri)
            .header(header::ACCEPT_LANGUAGE, "en")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let body = serde_urlencoded::to_string(form).unwrap();

        self.router
            .clone()
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    /// Follows an entry url through `/resolve` and returns the redirect
    /// target with the session cookie it set.
    pub async fn enter(&self, query: &str) -> (String, String) {
        let response = self.get(&format!("/resolve?{query}"), None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let cookie = session_cookie(&response).expect("resolve sets the session cookie");

        (location(&response).to_owned(), cookie)
    }
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `session=<jwt>` ready to send back in a `Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session=") && !v.contains("Max-Age=0"))
        .and_then(|v| v.split(';').next())
        .map(ToOwned::to_owned)
}

pub fn removes_session(response: &Response<Body>) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("session=") && v.contains("Max-Age=0"))
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(bytes.to_vec()).unwrap()
}

pub const REGISTRATION_FORM: [(&str, &str); 8] = [
    ("first_name", "Somchai"),
    ("last_name", "Jaidee"),
    ("phone", "0812345678"),
    ("address", "99 Moo 4"),
    ("province", "Prachinburi"),
    ("farm_area_rai", "12.5"),
    ("accept_privacy", "on"),
    ("accept_terms", "on"),
];

/// Registers through the LINE callback and returns the new session cookie
/// with the redirect target after submit.
pub async fn register_farmer(app: &TestApp) -> (String, String) {
    let (target, cookie) = app.enter("code=abc123&state=farmer").await;
    assert_eq!(target, "/register");

    let response = app
        .post("/register", Some(&cookie), &REGISTRATION_FORM)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let target = location(&response).to_owned();
    let cookie = session_cookie(&response).expect("registration updates the session");

    (target, cookie)
}
