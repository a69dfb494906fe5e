mod access;
mod auth;
mod dashboards;
mod health_check;
mod helpers;
mod inventory;
mod orders;
mod resources;
