pub mod app;
pub mod clients;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use app::{app, AppState};
