use sea_query::Iden;

/// Namespaced key/value rows, each value a JSON document.
#[derive(Iden, Clone)]
pub enum KvStore {
    Table,
    Key,
    Value,
    UpdatedAt,
}
