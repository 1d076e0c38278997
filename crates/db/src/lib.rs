use sqlx_migrator::{Info, Migrator};

mod m0001;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;
    use sqlx_migrator::{Migrate, Plan};

    #[tokio::test]
    async fn test_migrations_create_kv_store() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        super::migrator()
            .unwrap()
            .run(&mut *conn, &Plan::apply_all())
            .await
            .unwrap();

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'")
                .fetch_all(&mut *conn)
                .await
                .unwrap();

        assert_eq!(tables.len(), 1);
    }
}
