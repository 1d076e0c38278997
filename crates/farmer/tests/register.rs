use bambooflow_farmer::{FarmerRepository, FarmerStatus, ProfileInput};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn register_with_auto_approve() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let record = helpers::command(&state, true)
        .register(helpers::register_input("  Somchai "))
        .await?;

    assert!(record.approved);
    assert_eq!(record.status, FarmerStatus::Approved);
    assert_eq!(record.first_name, "Somchai");

    Ok(())
}

#[tokio::test]
async fn register_pending_without_auto_approve() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let record = helpers::command(&state, false)
        .register(helpers::register_input("Somchai"))
        .await?;

    assert!(!record.approved);
    assert_eq!(record.status, FarmerStatus::Pending);
    assert!(state.repository.approved().await?.is_none());

    Ok(())
}

#[tokio::test]
async fn register_requires_both_acknowledgements() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, true);

    let mut input = helpers::register_input("Somchai");
    input.accepted_terms = false;
    let err = cmd.register(input).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please read and accept the privacy policy and the terms"
    );

    let mut input = helpers::register_input("Somchai");
    input.accepted_privacy = false;
    assert!(cmd.register(input).await.is_err());

    assert!(state.repository.list().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn register_requires_fields() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, true);

    let mut input = helpers::register_input("Somchai");
    input.phone = String::new();
    assert!(matches!(
        cmd.register(input).await.unwrap_err(),
        bambooflow_shared::Error::Validate(_)
    ));

    let mut input = helpers::register_input("Somchai");
    input.farm_area_rai = "lots".to_owned();
    assert_eq!(
        cmd.register(input).await.unwrap_err().to_string(),
        "Farm area must be a number"
    );

    Ok(())
}

#[tokio::test]
async fn approve_and_reject() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, false);

    let first = cmd.register(helpers::register_input("Somchai")).await?;
    let second = cmd.register(helpers::register_input("Malee")).await?;

    cmd.reject(&first.id).await?;
    cmd.approve(&second.id).await?;

    assert_eq!(cmd.load(&first.id).await?.status, FarmerStatus::NotApproved);
    assert_eq!(state.repository.approved().await?.unwrap().id, second.id);

    let err = cmd.approve("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "farmer not found");

    Ok(())
}

#[tokio::test]
async fn update_profile() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, true);
    let record = cmd.register(helpers::register_input("Somchai")).await?;

    let updated = cmd
        .update_profile(
            &record.id,
            ProfileInput {
                first_name: "Somchai".to_owned(),
                last_name: "Rakdee".to_owned(),
                phone: "0899999999".to_owned(),
                address: "1 Moo 2".to_owned(),
                province: "Kanchanaburi".to_owned(),
                farm_area_rai: "20".to_owned(),
            },
        )
        .await?;

    assert_eq!(updated.full_name(), "Somchai Rakdee");
    assert!(updated.approved);
    assert_eq!(cmd.load(&record.id).await?.farm_area_rai, 20.0);
    assert_eq!(state.repository.list().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn blank_fields_are_missing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, true);

    let mut input = helpers::register_input("   ");
    input.last_name = "  ".to_owned();
    assert!(matches!(
        cmd.register(input).await.unwrap_err(),
        bambooflow_shared::Error::Validate(_)
    ));
    assert!(state.repository.list().await?.is_empty());

    let mut input = helpers::register_input(" Somchai ");
    input.province = " Prachinburi\t".to_owned();
    let record = cmd.register(input).await?;
    assert_eq!(record.first_name, "Somchai");
    assert_eq!(record.province, "Prachinburi");

    let err = cmd
        .update_profile(
            &record.id,
            ProfileInput {
                first_name: "Somchai".to_owned(),
                last_name: "Jaidee".to_owned(),
                phone: " ".to_owned(),
                address: "1 Moo 2".to_owned(),
                province: "Kanchanaburi".to_owned(),
                farm_area_rai: "20".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, bambooflow_shared::Error::Validate(_)));
    assert_eq!(cmd.load(&record.id).await?.phone, record.phone);

    Ok(())
}
