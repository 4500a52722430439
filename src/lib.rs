pub mod api;
pub mod clients;
pub mod config;
pub mod errors;
pub mod health;
pub mod logging;
pub mod models;
pub mod webhooks;
