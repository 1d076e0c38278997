use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use bambooflow_content::{Article, ArticleCategory};
use bambooflow_farmer::FarmerRecord;
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    auth::AuthFarmer,
    routes::AppState,
    template::{Template, filters},
};

#[derive(Deserialize)]
pub struct KnowledgeQuery {
    pub category: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "farmer/knowledge.html")]
pub struct KnowledgeTemplate {
    pub current_page: &'static str,
    pub farmer: FarmerRecord,
    pub categories: &'static [ArticleCategory],
    pub category: Option<ArticleCategory>,
    pub articles: Vec<Article>,
}

#[derive(askama::Template)]
#[template(path = "farmer/article.html")]
pub struct ArticleTemplate {
    pub current_page: &'static str,
    pub farmer: FarmerRecord,
    pub article: Article,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    auth: AuthFarmer,
    Query(query): Query<KnowledgeQuery>,
) -> Response {
    let farmer = match super::load_farmer(&app, &template, jar, &auth).await {
        Ok(farmer) => farmer,
        Err(response) => return response,
    };

    let category = query
        .category
        .as_deref()
        .and_then(|c| ArticleCategory::from_str(c).ok());

    let articles = app.articles.list(category, false).await;

    template.render(KnowledgeTemplate {
        current_page: "knowledge",
        farmer,
        categories: ArticleCategory::VARIANTS,
        category,
        articles,
    })
}

pub async fn article(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    auth: AuthFarmer,
    Path(id): Path<String>,
) -> Response {
    let farmer = match super::load_farmer(&app, &template, jar, &auth).await {
        Ok(farmer) => farmer,
        Err(response) => return response,
    };

    let article = crate::try_page_response!(app.articles.find_published(&id), template);

    template.render(ArticleTemplate {
        current_page: "knowledge",
        farmer,
        article,
    })
}
