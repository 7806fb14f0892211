pub mod app;
pub mod auth;
pub mod config;
pub mod filter;
pub mod listings;
pub mod models;
pub mod supabase;
pub mod view;

pub use app::{App, AppContext};
pub use config::AppConfig;
