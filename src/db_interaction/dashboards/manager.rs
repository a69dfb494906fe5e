use chrono::{DateTime, NaiveDate, Utc};
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db_interaction::day_range,
    domain::status::OrderStatus,
    models::Notification,
    schema::notifications,
    utils::{run_consistent_read, DbError, DbPool}
};

use super::{
    active_order_count, average, completed_revenue, expiry_alerts, kitchen::{queue_counts, QueueCounts},
    load_restaurant, order_count, staff::{restaurant_staff, StaffCounts}, table_breakdown,
    ExpiryAlerts, RestaurantSummary, TableBreakdown
};

pub const MANAGER_EXPIRY_DAYS: i64 = 3;

#[derive(Serialize, Debug)]
pub struct ManagerToday{
    pub completed_orders: i64,
    pub revenue: f64,
    pub average_order_value: f64
}

#[derive(Serialize, Debug)]
pub struct ManagerDashboard{
    pub restaurant: RestaurantSummary,
    pub active_orders: i64,
    pub kitchen: QueueCounts,
    pub tables: TableBreakdown,
    pub staff: StaffCounts,
    pub inventory_alerts: ExpiryAlerts,
    pub today: ManagerToday,
    pub notifications: Vec<Notification>,
    pub last_updated: DateTime<Utc>
}

#[tracing::instrument(
    "Building manager dashboard",
    skip(pool)
)]
pub async fn manager_dashboard(
    pool: &DbPool,
    restaurant_id: Uuid,
    today: NaiveDate
) -> Result<ManagerDashboard, DbError> {
    run_consistent_read(pool, move |conn| {
        let restaurant = load_restaurant(conn, restaurant_id)?;
        let (start, end) = day_range(today);

        let revenue = completed_revenue(conn, Some(restaurant_id), start, end)?;
        let completed_orders = order_count(conn, Some(restaurant_id), start, end, Some(OrderStatus::Completed))?;

        let notifications = notifications::table
            .filter(notifications::restaurant_id.eq(restaurant_id))
            .filter(notifications::read.eq(false))
            .order(notifications::created_at.desc())
            .limit(5)
            .select(Notification::as_select())
            .load(conn)?;

        Ok(ManagerDashboard{
            restaurant: RestaurantSummary::from(&restaurant),
            active_orders: active_order_count(conn, restaurant_id)?,
            kitchen: queue_counts(conn, restaurant_id)?,
            tables: table_breakdown(conn, restaurant_id)?,
            staff: StaffCounts::from_members(&restaurant_staff(conn, restaurant_id)?),
            inventory_alerts: expiry_alerts(conn, restaurant_id, today, MANAGER_EXPIRY_DAYS)?,
            today: ManagerToday{
                completed_orders,
                revenue,
                average_order_value: average(revenue, completed_orders)
            },
            notifications,
            last_updated: Utc::now()
        })
    })
    .await
}
