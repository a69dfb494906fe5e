use chrono::{DateTime, Duration, Timelike, Utc};
use diesel::{dsl::count_star, ExpressionMethods, QueryDsl, RunQueryDsl};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    schema::orders,
    utils::{run_consistent_read, DbError, DbPool}
};

use super::{
    active_order_count, kitchen::{queue_entries, KitchenQueues, QueueCounts}, load_restaurant, low_stock_count,
    staff::{on_duty, restaurant_staff}, table_breakdown, TableBreakdown
};

#[derive(Serialize, Debug)]
pub struct RealtimeAlerts{
    pub low_stock: i64,
    pub delayed_items: usize
}

#[derive(Serialize, Debug)]
pub struct RealtimeStatus{
    pub restaurant_id: Uuid,
    pub active_orders: i64,
    pub orders_last_30_minutes: i64,
    pub kitchen_queue: QueueCounts,
    pub tables: TableBreakdown,
    pub staff_on_duty: i64,
    pub alerts: RealtimeAlerts,
    pub timestamp: DateTime<Utc>
}

#[tracing::instrument(
    "Building real-time status",
    skip(pool)
)]
pub async fn realtime_status(pool: &DbPool, restaurant_id: Uuid) -> Result<RealtimeStatus, DbError> {
    run_consistent_read(pool, move |conn| {
        load_restaurant(conn, restaurant_id)?;
        let now = Utc::now();

        let orders_last_30_minutes = orders::table
            .filter(orders::restaurant_id.eq(restaurant_id))
            .filter(orders::created_at.ge(now - Duration::minutes(30)))
            .select(count_star())
            .get_result(conn)?;

        let queues = KitchenQueues::build(queue_entries(conn, restaurant_id, now)?, 0);
        let members = restaurant_staff(conn, restaurant_id)?;

        Ok(RealtimeStatus{
            restaurant_id,
            active_orders: active_order_count(conn, restaurant_id)?,
            orders_last_30_minutes,
            tables: table_breakdown(conn, restaurant_id)?,
            staff_on_duty: on_duty(&members, now.hour()),
            alerts: RealtimeAlerts{
                low_stock: low_stock_count(conn, Some(restaurant_id))?,
                delayed_items: queues.priority.len()
            },
            kitchen_queue: queues.counts,
            timestamp: now
        })
    })
    .await
}
