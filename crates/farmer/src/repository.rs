use bambooflow_db::table::KvStore;
use bambooflow_session::FarmerStanding;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteExecutor, SqlitePool};
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{FarmerRecord, FarmerStatus};

/// Every farmer record lives in one JSON array under this key.
pub const FARMERS_KEY: &str = "bambooflow.farmers";

/// Typed access to the persisted farmer records.
///
/// Implementations only need `get/list/put/clear`; the lookups used by the
/// entry resolver are derived from `list`.
#[async_trait::async_trait]
pub trait FarmerRepository: Send + Sync {
    async fn list(&self) -> bambooflow_shared::Result<Vec<FarmerRecord>>;

    /// Inserts the record, or replaces the one with the same id.
    async fn put(&self, record: FarmerRecord) -> bambooflow_shared::Result<()>;

    async fn clear(&self) -> bambooflow_shared::Result<()>;

    async fn get(&self, id: &str) -> bambooflow_shared::Result<Option<FarmerRecord>> {
        Ok(self.list().await?.into_iter().find(|r| r.id == id))
    }

    /// "The" approved farmer: the first approved record in insertion order.
    async fn approved(&self) -> bambooflow_shared::Result<Option<FarmerRecord>> {
        Ok(self.list().await?.into_iter().find(|r| r.approved))
    }

    /// Approved record if any, otherwise the standing of the latest record.
    async fn standing(&self) -> bambooflow_shared::Result<Option<FarmerStanding>> {
        let records = self.list().await?;

        if let Some(record) = records.iter().find(|r| r.approved) {
            return Ok(Some(record.standing()));
        }

        Ok(records.last().map(FarmerRecord::standing))
    }

    async fn count_by_status(&self, status: FarmerStatus) -> bambooflow_shared::Result<usize> {
        Ok(self
            .list()
            .await?
            .iter()
            .filter(|r| r.status == status)
            .count())
    }
}

/// Unreadable data is treated as no data so a broken value sends farmers back
/// to registration instead of locking everyone out.
fn decode(raw: Option<&str>) -> Vec<FarmerRecord> {
    let Some(raw) = raw else {
        return vec![];
    };

    match serde_json::from_str::<Vec<FarmerRecord>>(raw) {
        Ok(records) => records.into_iter().map(FarmerRecord::normalized).collect(),
        Err(err) => {
            tracing::warn!(key = FARMERS_KEY, err = %err, "failed to parse farmer records");
            vec![]
        }
    }
}

fn upsert(records: &mut Vec<FarmerRecord>, record: FarmerRecord) {
    match records.iter_mut().find(|r| r.id == record.id) {
        Some(existing) => *existing = record,
        _ => records.push(record),
    }
}

#[derive(Clone)]
pub struct SqliteFarmerRepository {
    read_db: SqlitePool,
    write_db: SqlitePool,
}

impl SqliteFarmerRepository {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    async fn load_raw<'e, E: SqliteExecutor<'e>>(
        executor: E,
    ) -> bambooflow_shared::Result<Option<String>> {
        let statement = Query::select()
            .column(KvStore::Value)
            .from(KvStore::Table)
            .and_where(Expr::col(KvStore::Key).eq(FARMERS_KEY))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(executor)
            .await?;

        Ok(row.map(|(value,)| value))
    }
}

#[async_trait::async_trait]
impl FarmerRepository for SqliteFarmerRepository {
    async fn list(&self) -> bambooflow_shared::Result<Vec<FarmerRecord>> {
        let raw = Self::load_raw(&self.read_db).await?;

        Ok(decode(raw.as_deref()))
    }

    async fn put(&self, record: FarmerRecord) -> bambooflow_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        let raw = Self::load_raw(&mut *tx).await?;
        let mut records = decode(raw.as_deref());
        upsert(&mut records, record);

        let statement = Query::insert()
            .into_table(KvStore::Table)
            .columns([KvStore::Key, KvStore::Value, KvStore::UpdatedAt])
            .values_panic([
                FARMERS_KEY.into(),
                serde_json::to_string(&records)?.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .on_conflict(
                OnConflict::column(KvStore::Key)
                    .update_columns([KvStore::Value, KvStore::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self) -> bambooflow_shared::Result<()> {
        let statement = Query::delete()
            .from_table(KvStore::Table)
            .and_where(Expr::col(KvStore::Key).eq(FARMERS_KEY))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }
}

/// Keeps the serialized array in memory, same encoding as the sqlite store.
#[derive(Default)]
pub struct MemoryFarmerRepository {
    raw: Mutex<Option<String>>,
}

impl MemoryFarmerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

#[async_trait::async_trait]
impl FarmerRepository for MemoryFarmerRepository {
    async fn list(&self) -> bambooflow_shared::Result<Vec<FarmerRecord>> {
        Ok(decode(self.raw.lock().await.as_deref()))
    }

    async fn put(&self, record: FarmerRecord) -> bambooflow_shared::Result<()> {
        let mut raw = self.raw.lock().await;
        let mut records = decode(raw.as_deref());
        upsert(&mut records, record);
        *raw = Some(serde_json::to_string(&records)?);

        Ok(())
    }

    async fn clear(&self) -> bambooflow_shared::Result<()> {
        *self.raw.lock().await = None;

        Ok(())
    }
}
