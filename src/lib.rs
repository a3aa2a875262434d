pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;
