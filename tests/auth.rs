mod helpers;

use axum::http::StatusCode;
use helpers::{body_string, location, removes_session, session_cookie, setup_test_app};

#[tokio::test]
async fn test_admin_credentials() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("role=admin&action=login").await;

    let response = app
        .post(
            "/login",
            Some(&cookie),
            &[("username", "admin"), ("password", "wrong")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Invalid username or password"));

    let response = app
        .post(
            "/login",
            Some(&cookie),
            &[("username", "admin"), ("password", "admin1234")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    let cookie = session_cookie(&response).unwrap();
    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_factory_credentials_do_not_open_admin() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("role=factory&action=login").await;

    let response = app
        .post(
            "/login",
            Some(&cookie),
            &[("username", "factory"), ("password", "factory1234")],
        )
        .await;
    assert_eq!(location(&response), "/factory");

    let cookie = session_cookie(&response).unwrap();
    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.get("/farmer", Some(&cookie)).await;
    assert_eq!(location(&response), "/");

    Ok(())
}

#[tokio::test]
async fn test_login_without_session() -> anyhow::Result<()> {
    let app = setup_test_app().await?;

    let response = app.get("/login", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    Ok(())
}

#[tokio::test]
async fn test_authenticated_visitor_skips_login() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("role=factory&action=direct").await;

    let response = app.get("/login", Some(&cookie)).await;
    assert_eq!(location(&response), "/factory");

    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(location(&response), "/factory");

    Ok(())
}

#[tokio::test]
async fn test_logout() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("role=factory&action=direct").await;

    let response = app.post("/logout", Some(&cookie), &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(removes_session(&response));

    Ok(())
}

#[tokio::test]
async fn test_tampered_cookie_is_ignored() -> anyhow::Result<()> {
    let app = setup_test_app().await?;

    let response = app.get("/factory", Some("session=not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    Ok(())
}

#[tokio::test]
async fn test_farmer_logout_keeps_record() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = helpers::register_farmer(&app).await;
    let farmer_id = app.state.farmer_command.list().await?[0].id.to_owned();

    let response = app.post("/logout", Some(&cookie), &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(removes_session(&response));

    let records = app.state.farmer_command.list().await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, farmer_id);
    assert!(records[0].approved);

    // reload with no query and no cookie
    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("url=/resolve\""));

    let response = app.get("/resolve", None).await;
    assert_eq!(location(&response), "/");
    let anonymous = session_cookie(&response).unwrap();
    let response = app.get("/", Some(&anonymous)).await;
    assert!(body_string(response).await.contains("role=farmer"));

    let (target, cookie) = app.enter("code=x&state=farmer").await;
    assert_eq!(target, "/farmer");

    let token = cookie.trim_start_matches("session=");
    let session = bambooflow::auth::decode_session(&app.state.config.jwt, token).unwrap();
    assert_eq!(session.farmer_id.as_deref(), Some(farmer_id.as_str()));

    Ok(())
}
