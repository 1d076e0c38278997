rust_i18n::i18n!("locales", fallback = "en");

pub mod assets;
pub mod auth;
pub mod config;
pub mod db;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;

pub use config::Config;
pub use routes::{AppState, router};
