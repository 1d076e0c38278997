use std::{path::PathBuf, str::FromStr, sync::Arc};

use bambooflow_farmer::{Command, RegisterInput, SqliteFarmerRepository};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct TestState {
    pub pool: SqlitePool,
    pub repository: Arc<SqliteFarmerRepository>,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    bambooflow_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(TestState {
        repository: Arc::new(SqliteFarmerRepository::new(pool.clone(), pool.clone())),
        pool,
    })
}

#[allow(dead_code)]
pub fn command(state: &TestState, auto_approve: bool) -> Command {
    Command::new(state.repository.clone(), auto_approve)
}

#[allow(dead_code)]
pub fn register_input(first_name: impl Into<String>) -> RegisterInput {
    RegisterInput {
        line_user_id: Some("Uabc123".to_owned()),
        first_name: first_name.into(),
        last_name: "Jaidee".to_owned(),
        phone: "0812345678".to_owned(),
        address: "99 Moo 4".to_owned(),
        province: "Prachinburi".to_owned(),
        farm_area_rai: "12.5".to_owned(),
        accepted_privacy: true,
        accepted_terms: true,
    }
}
