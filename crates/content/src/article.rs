use std::sync::Arc;

use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use ulid::Ulid;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, VariantArray,
)]
#[strum(serialize_all = "snake_case")]
pub enum ArticleCategory {
    Cultivation,
    Harvesting,
    PestControl,
    Market,
}

impl ArticleCategory {
    pub fn label_key(&self) -> &'static str {
        match self {
            ArticleCategory::Cultivation => "article.category.cultivation",
            ArticleCategory::Harvesting => "article.category.harvesting",
            ArticleCategory::PestControl => "article.category.pest_control",
            ArticleCategory::Market => "article.category.market",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub category: ArticleCategory,
    pub summary: String,
    pub body: String,
    pub published: bool,
    pub updated_at: i64,
}

impl Article {
    pub fn paragraphs(&self) -> Vec<String> {
        crate::paragraphs(&self.body)
    }
}

#[derive(Validate)]
pub struct ArticleInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub category: ArticleCategory,
    #[validate(length(max = 400))]
    pub summary: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub published: bool,
}

#[derive(Clone, Default)]
pub struct ArticleStore {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first. Unpublished articles are skipped unless `include_drafts`.
    pub async fn list(&self, category: Option<ArticleCategory>, include_drafts: bool) -> Vec<Article> {
        let mut articles = self
            .articles
            .read()
            .await
            .iter()
            .filter(|a| include_drafts || a.published)
            .filter(|a| category.is_none_or(|c| a.category == c))
            .cloned()
            .collect::<Vec<_>>();

        articles.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        articles
    }

    pub async fn find(&self, id: &str) -> Option<Article> {
        self.articles
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Same as [`ArticleStore::find`] but hides drafts.
    pub async fn find_published(&self, id: &str) -> bambooflow_shared::Result<Article> {
        match self.find(id).await {
            Some(article) if article.published => Ok(article),
            _ => bambooflow_shared::not_found!("article"),
        }
    }

    pub async fn create(&self, input: ArticleInput) -> bambooflow_shared::Result<Article> {
        input.validate()?;

        let article = Article {
            id: Ulid::new().to_string(),
            title: input.title.trim().to_owned(),
            category: input.category,
            summary: input.summary.trim().to_owned(),
            body: input.body,
            published: input.published,
            updated_at: OffsetDateTime::now_utc().unix_timestamp(),
        };

        self.articles.write().await.push(article.clone());

        tracing::info!(article_id = %article.id, "article created");

        Ok(article)
    }

    pub async fn update(&self, id: &str, input: ArticleInput) -> bambooflow_shared::Result<Article> {
        input.validate()?;

        let mut articles = self.articles.write().await;
        let Some(article) = articles.iter_mut().find(|a| a.id == id) else {
            bambooflow_shared::not_found!("article");
        };

        article.title = input.title.trim().to_owned();
        article.category = input.category;
        article.summary = input.summary.trim().to_owned();
        article.body = input.body;
        article.published = input.published;
        article.updated_at = OffsetDateTime::now_utc().unix_timestamp();

        tracing::info!(article_id = %article.id, "article updated");

        Ok(article.clone())
    }

    pub async fn set_published(&self, id: &str, published: bool) -> bambooflow_shared::Result<()> {
        let mut articles = self.articles.write().await;
        let Some(article) = articles.iter_mut().find(|a| a.id == id) else {
            bambooflow_shared::not_found!("article");
        };

        article.published = published;

        Ok(())
    }

    /// `(published, drafts)`
    pub async fn counts(&self) -> (usize, usize) {
        let articles = self.articles.read().await;
        let published = articles.iter().filter(|a| a.published).count();

        (published, articles.len() - published)
    }

    pub(crate) async fn insert(&self, article: Article) {
        self.articles.write().await.push(article);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, published: bool) -> ArticleInput {
        ArticleInput {
            title: title.to_owned(),
            category: ArticleCategory::Cultivation,
            summary: String::new(),
            body: "Water twice a week.".to_owned(),
            published,
        }
    }

    #[tokio::test]
    async fn test_drafts_are_hidden() {
        let store = ArticleStore::new();
        let draft = store.create(input("Draft", false)).await.unwrap();
        store.create(input("Live", true)).await.unwrap();

        assert_eq!(store.list(None, false).await.len(), 1);
        assert_eq!(store.list(None, true).await.len(), 2);
        assert!(store.find_published(&draft.id).await.is_err());

        store.set_published(&draft.id, true).await.unwrap();
        assert!(store.find_published(&draft.id).await.is_ok());
        assert_eq!(store.counts().await, (2, 0));
    }

    #[tokio::test]
    async fn test_update_and_validation() {
        let store = ArticleStore::new();
        let article = store.create(input("Old", true)).await.unwrap();

        let mut next = input("  New title ", true);
        next.category = ArticleCategory::Market;
        let updated = store.update(&article.id, next).await.unwrap();
        assert_eq!(updated.title, "New title");

        assert!(
            store
                .list(Some(ArticleCategory::Cultivation), false)
                .await
                .is_empty()
        );
        assert!(store.create(input("", true)).await.is_err());
        assert!(store.update("missing", input("x", true)).await.is_err());
    }
}
