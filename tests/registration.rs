mod helpers;

use axum::http::StatusCode;
use bambooflow_farmer::FarmerStatus;
use helpers::{
    REGISTRATION_FORM, body_string, location, register_farmer, setup_test_app,
    setup_test_app_with,
};

#[tokio::test]
async fn test_registration_requires_policies() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("code=abc123&state=farmer").await;

    let form: Vec<(&str, &str)> = REGISTRATION_FORM
        .iter()
        .copied()
        .filter(|(key, _)| *key != "accept_terms")
        .collect();

    let response = app.post("/register", Some(&cookie), &form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Please read and accept the privacy policy and the terms"));
    assert!(body.contains("Somchai"));

    assert!(app.state.farmer_command.list().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_registration_rejects_bad_area() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("code=abc123&state=farmer").await;

    let form: Vec<(&str, &str)> = REGISTRATION_FORM
        .iter()
        .map(|&(key, value)| match key {
            "farm_area_rai" => (key, "lots"),
            _ => (key, value),
        })
        .collect();

    let response = app.post("/register", Some(&cookie), &form).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.state.farmer_command.list().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_registration_rejects_blank_names() -> anyhow::Result<()> {
    let app = setup_test_app().await?;
    let (_, cookie) = app.enter("code=abc123&state=farmer").await;

    let form: Vec<(&str, &str)> = REGISTRATION_FORM
        .iter()
        .map(|&(key, value)| match key {
            "first_name" => (key, "   "),
            "last_name" => (key, "  "),
            _ => (key, value),
        })
        .collect();

    let response = app.post("/register", Some(&cookie), &form).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_string(response)
            .await
            .contains("Please fill in every required field.")
    );
    assert!(app.state.farmer_command.list().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_auto_approved_registration() -> anyhow::Result<()> {
    let app = setup_test_app().await?;

    let (target, cookie) = register_farmer(&app).await;
    assert_eq!(target, "/farmer");

    let response = app.get("/farmer", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Somchai"));

    let records = app.state.farmer_command.list().await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, FarmerStatus::Approved);
    assert_eq!(records[0].line_user_id.as_deref(), Some("Uabc123"));

    // coming back through LINE skips the form
    let (target, _) = app.enter("code=again&state=farmer").await;
    assert_eq!(target, "/farmer");

    Ok(())
}

#[tokio::test]
async fn test_pending_registration_until_approved() -> anyhow::Result<()> {
    let app = setup_test_app_with(|config| config.registration.auto_approve = false).await?;

    let (target, cookie) = register_farmer(&app).await;
    assert_eq!(target, "/register/pending");

    let response = app.get("/register/pending", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/farmer", Some(&cookie)).await;
    assert_eq!(location(&response), "/");

    let (target, _) = app.enter("code=again&state=farmer").await;
    assert_eq!(target, "/register/pending");

    let (_, admin) = app.enter("role=admin&action=login").await;
    let response = app
        .post(
            "/login",
            Some(&admin),
            &[("username", "admin"), ("password", "admin1234")],
        )
        .await;
    let admin = helpers::session_cookie(&response).unwrap();

    let farmer_id = app.state.farmer_command.list().await?[0].id.to_owned();
    let response = app
        .post(&format!("/admin/farmers/{farmer_id}/approve"), Some(&admin), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/farmers");

    let (target, _) = app.enter("code=again&state=farmer").await;
    assert_eq!(target, "/farmer");

    Ok(())
}

#[tokio::test]
async fn test_rejected_registration() -> anyhow::Result<()> {
    let app = setup_test_app_with(|config| config.registration.auto_approve = false).await?;
    register_farmer(&app).await;

    let farmer_id = app.state.farmer_command.list().await?[0].id.to_owned();
    app.state.farmer_command.reject(&farmer_id).await?;

    let (target, cookie) = app.enter("code=again&state=farmer").await;
    assert_eq!(target, "/register/rejected");

    let response = app.get("/register/rejected", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_register_entry_without_line() -> anyhow::Result<()> {
    let app = setup_test_app().await?;

    let (target, cookie) = app.enter("action=register").await;
    assert_eq!(target, "/register");

    let response = app.get("/register", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_policy_pages() -> anyhow::Result<()> {
    let app = setup_test_app().await?;

    let response = app.get("/policy", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Privacy policy"));

    let response = app.get("/terms", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Terms of service"));

    Ok(())
}
