use std::{collections::HashMap, sync::Arc};

use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, VariantArray,
)]
#[strum(serialize_all = "snake_case")]
pub enum PolicyKind {
    Privacy,
    Terms,
}

impl PolicyKind {
    pub fn label_key(&self) -> &'static str {
        match self {
            PolicyKind::Privacy => "policy.privacy",
            PolicyKind::Terms => "policy.terms",
        }
    }

    /// Public page the registration form links to.
    pub fn path(&self) -> &'static str {
        match self {
            PolicyKind::Privacy => "/policy",
            PolicyKind::Terms => "/terms",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDocument {
    pub kind: PolicyKind,
    pub title: String,
    pub body: String,
    pub updated_at: i64,
}

impl PolicyDocument {
    pub fn paragraphs(&self) -> Vec<String> {
        crate::paragraphs(&self.body)
    }
}

#[derive(Validate)]
pub struct PolicyInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
}

/// Privacy policy and terms shown during registration, editable by admins.
#[derive(Clone, Default)]
pub struct PolicyStore {
    documents: Arc<RwLock<HashMap<PolicyKind, PolicyDocument>>>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, kind: PolicyKind) -> bambooflow_shared::Result<PolicyDocument> {
        let Some(document) = self.documents.read().await.get(&kind).cloned() else {
            bambooflow_shared::not_found!("{} document", kind);
        };

        Ok(document)
    }

    pub async fn update(
        &self,
        kind: PolicyKind,
        input: PolicyInput,
    ) -> bambooflow_shared::Result<PolicyDocument> {
        input.validate()?;

        let document = PolicyDocument {
            kind,
            title: input.title.trim().to_owned(),
            body: input.body,
            updated_at: OffsetDateTime::now_utc().unix_timestamp(),
        };

        self.documents
            .write()
            .await
            .insert(kind, document.clone());

        tracing::info!(kind = %kind, "policy document updated");

        Ok(document)
    }
}
