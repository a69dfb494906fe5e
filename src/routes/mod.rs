use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

pub mod authentication;
pub mod restaurants;
pub mod employees;
pub mod staff;
pub mod menu;
pub mod inventory;
pub mod tables;
pub mod customers;
pub mod orders;
pub mod vendors;
pub mod notifications;
pub mod finance;
pub mod dashboards;
mod health_check;

pub use health_check::health_check;

// `?restaurant_id=` narrowing of list endpoints
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct RestaurantQuery{
    pub restaurant_id: Option<Uuid>
}

// Calendar day used by date-windowed reads, always UTC
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
