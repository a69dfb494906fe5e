use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::{Insertable, Queryable, Selectable};
use serde::Serialize;

use crate::schema::daily_stats;

// Global counts captured once per calendar day, used for week-over-week comparisons
#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = daily_stats, check_for_backend(diesel::pg::Pg))]
pub struct DailyStats{
    pub stat_date: NaiveDate,
    pub total_restaurants: i64,
    pub total_employees: i64,
    pub total_vendors: i64,
    pub total_orders: i64,
    pub revenue: f64,
    pub created_at: DateTime<Utc>
}
