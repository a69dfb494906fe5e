pub mod access;
pub mod auth;
pub mod configuration;
pub mod db_interaction;
pub mod domain;
pub mod error;
pub mod health;
pub mod models;
pub mod password;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod telemetry;
pub mod utils;
