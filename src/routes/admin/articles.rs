use std::str::FromStr;

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bambooflow_content::{Article, ArticleCategory, ArticleInput};
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    auth::AuthAdmin,
    routes::AppState,
    template::{NotFoundTemplate, ServerTemplate, Template, filters},
};

#[derive(Deserialize)]
pub struct ArticlesQuery {
    pub category: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "admin/articles.html")]
pub struct ArticlesTemplate {
    pub current_page: &'static str,
    pub categories: &'static [ArticleCategory],
    pub category: Option<ArticleCategory>,
    pub articles: Vec<Article>,
}

#[derive(Clone, Default, Deserialize)]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    pub published: Option<String>,
}

impl ArticleForm {
    fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.to_owned(),
            category: article.category.to_string(),
            summary: article.summary.to_owned(),
            body: article.body.to_owned(),
            published: article.published.then(|| "on".to_owned()),
        }
    }

    fn into_input(self) -> bambooflow_shared::Result<ArticleInput> {
        let Ok(category) = ArticleCategory::from_str(&self.category) else {
            bambooflow_shared::user!("Please choose a category");
        };

        Ok(ArticleInput {
            title: self.title,
            category,
            summary: self.summary,
            body: self.body,
            published: self.published.is_some(),
        })
    }
}

#[derive(askama::Template)]
#[template(path = "admin/article-form.html")]
pub struct ArticleFormTemplate {
    pub current_page: &'static str,
    pub article_id: Option<String>,
    pub categories: &'static [ArticleCategory],
    pub form: ArticleForm,
    pub error_message: Option<String>,
}

impl ArticleFormTemplate {
    fn new(article_id: Option<String>, form: ArticleForm, error_message: Option<String>) -> Self {
        Self {
            current_page: "articles",
            article_id,
            categories: ArticleCategory::VARIANTS,
            form,
            error_message,
        }
    }
}

/// Drafts included, newest first.
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Query(query): Query<ArticlesQuery>,
) -> Response {
    let category = query
        .category
        .as_deref()
        .and_then(|c| ArticleCategory::from_str(c).ok());

    template.render(ArticlesTemplate {
        current_page: "articles",
        categories: ArticleCategory::VARIANTS,
        category,
        articles: app.articles.list(category, true).await,
    })
}

pub async fn create(template: Template, _auth: AuthAdmin) -> Response {
    template.render(ArticleFormTemplate::new(None, ArticleForm::default(), None))
}

fn form_error(
    template: &Template,
    article_id: Option<String>,
    form: ArticleForm,
    err: bambooflow_shared::Error,
) -> Response {
    if let bambooflow_shared::Error::NotFound(_) = err {
        return template.render_status(StatusCode::NOT_FOUND, NotFoundTemplate);
    }

    match template.user_message(&err) {
        Some(message) => template.render(ArticleFormTemplate::new(article_id, form, Some(message))),
        _ => template.render_status(StatusCode::INTERNAL_SERVER_ERROR, ServerTemplate),
    }
}

pub async fn create_action(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Form(form): Form<ArticleForm>,
) -> Response {
    let result = match form.clone().into_input() {
        Ok(input) => app.articles.create(input).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Redirect::to("/admin/articles").into_response(),
        Err(err) => form_error(&template, None, form, err),
    }
}

pub async fn edit(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
) -> Response {
    let article = crate::try_page_response!(opt: app.articles.find(&id), template);

    template.render(ArticleFormTemplate::new(
        Some(article.id.to_owned()),
        ArticleForm::from_article(&article),
        None,
    ))
}

pub async fn edit_action(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
    Form(form): Form<ArticleForm>,
) -> Response {
    let result = match form.clone().into_input() {
        Ok(input) => app.articles.update(&id, input).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Redirect::to("/admin/articles").into_response(),
        Err(err) => form_error(&template, Some(id), form, err),
    }
}

/// Flips between published and draft.
pub async fn toggle_published(
    template: Template,
    State(app): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
) -> Response {
    let article = crate::try_page_response!(opt: app.articles.find(&id), template);

    crate::try_page_response!(
        app.articles.set_published(&article.id, !article.published),
        template
    );

    Redirect::to("/admin/articles").into_response()
}
