pub mod app_error;
pub mod dashboard;
pub mod files;
pub mod health;
pub mod server;
pub mod state;
