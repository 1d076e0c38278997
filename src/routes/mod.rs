use std::sync::Arc;

use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use bambooflow_booking::BookingBoard;
use bambooflow_content::{ArticleStore, MasterData, PolicyStore};
use bambooflow_farmer::SqliteFarmerRepository;
use sqlx::SqlitePool;

use crate::template::{NotFoundTemplate, Template};

mod admin;
mod factory;
mod farmer;
mod health;
mod index;
mod login;
mod policy;
mod register;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub farmer_command: bambooflow_farmer::Command,
    pub bookings: BookingBoard,
    pub articles: ArticleStore,
    pub policies: PolicyStore,
    pub master_data: MasterData,
    pub pool: SqlitePool,
}

impl AppState {
    /// Wires the farmer repository to the pools and seeds the in-memory stores.
    pub async fn new(
        config: crate::config::Config,
        read_pool: SqlitePool,
        write_pool: SqlitePool,
    ) -> anyhow::Result<Self> {
        let repository = Arc::new(SqliteFarmerRepository::new(read_pool.clone(), write_pool));
        let farmer_command =
            bambooflow_farmer::Command::new(repository, config.registration.auto_approve);

        let bookings = BookingBoard::new(config.booking.daily_capacity);
        if config.booking.seed_demo {
            bambooflow_booking::seed_demo(&bookings, bambooflow_shared::today()).await;
        }

        let articles = ArticleStore::new();
        let policies = PolicyStore::new();
        let master_data = MasterData::new();
        bambooflow_content::seed_content(&articles, &policies, &master_data).await?;

        Ok(Self {
            config,
            farmer_command,
            bookings,
            articles,
            policies,
            master_data,
            pool: read_pool,
        })
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render_status(axum::http::StatusCode::NOT_FOUND, NotFoundTemplate)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(index::page))
        .route("/resolve", get(index::resolve))
        .route("/auth/line", get(index::line_authorize))
        .route("/login", get(login::page).post(login::action))
        .route("/logout", post(login::logout))
        .route("/register", get(register::page).post(register::action))
        .route("/register/pending", get(register::pending))
        .route("/register/rejected", get(register::rejected))
        .route("/policy", get(policy::privacy))
        .route("/terms", get(policy::terms))
        .route("/farmer", get(farmer::overview::page))
        .route(
            "/farmer/bookings",
            get(farmer::bookings::page).post(farmer::bookings::action),
        )
        .route("/farmer/calendar", get(farmer::calendar::page))
        .route("/farmer/knowledge", get(farmer::knowledge::page))
        .route("/farmer/knowledge/{id}", get(farmer::knowledge::article))
        .route(
            "/farmer/profile",
            get(farmer::profile::page).post(farmer::profile::action),
        )
        .route("/factory", get(factory::overview::page))
        .route("/factory/bookings", get(factory::bookings::page))
        .route(
            "/factory/bookings/{id}/{action}",
            post(factory::bookings::action),
        )
        .route("/factory/calendar", get(factory::calendar::page))
        .route("/admin", get(admin::overview::page))
        .route("/admin/farmers", get(admin::farmers::page))
        .route("/admin/farmers/{id}/approve", post(admin::farmers::approve))
        .route("/admin/farmers/{id}/reject", post(admin::farmers::reject))
        .route("/admin/master-data", get(admin::master_data::page))
        .route(
            "/admin/master-data/species",
            post(admin::master_data::add_species),
        )
        .route(
            "/admin/master-data/species/{id}/delete",
            post(admin::master_data::remove_species),
        )
        .route(
            "/admin/master-data/pickup-points",
            post(admin::master_data::add_pickup_point),
        )
        .route(
            "/admin/master-data/pickup-points/{id}/delete",
            post(admin::master_data::remove_pickup_point),
        )
        .route("/admin/articles", get(admin::articles::page))
        .route(
            "/admin/articles/new",
            get(admin::articles::create).post(admin::articles::create_action),
        )
        .route(
            "/admin/articles/{id}",
            get(admin::articles::edit).post(admin::articles::edit_action),
        )
        .route(
            "/admin/articles/{id}/publish",
            post(admin::articles::toggle_published),
        )
        .route(
            "/admin/policies/{kind}",
            get(admin::policies::page).post(admin::policies::action),
        )
        .fallback(fallback)
        .nest_service("/static", crate::assets::AssetsService::new())
        .with_state(app_state)
}
