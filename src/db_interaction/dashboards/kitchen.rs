use chrono::{DateTime, NaiveDate, Utc};
use diesel::{dsl::count_star, ExpressionMethods, NullableExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db_interaction::day_range,
    domain::status::{OrderItemStatus, OrderStatus},
    models::{InventoryItem, OrderItem},
    schema::{dining_tables, menu_items, order_items, orders},
    utils::{round_to, run_consistent_read, DbError, DbPool}
};

use super::{load_restaurant, low_stock_count, low_stock_items, order_count, RestaurantSummary};

// Items of active orders waiting longer than this are flagged
pub const PRIORITY_AFTER_MINUTES: i64 = 30;
pub const QUEUE_LENGTH: usize = 10;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueueEntry{
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub menu_item_name: String,
    pub quantity: i32,
    pub table_number: Option<String>,
    pub status: String,
    pub notes: String,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub waiting_minutes: i64
}

impl QueueEntry {
    fn new(item: OrderItem, menu_item_name: String, table_number: Option<String>, now: DateTime<Utc>) -> Self {
        QueueEntry{
            order_item_id: item.order_item_id,
            order_id: item.order_id,
            menu_item_name,
            quantity: item.quantity,
            table_number,
            waiting_minutes: (now - item.added_at).num_minutes().max(0),
            status: item.status,
            notes: item.notes,
            added_at: item.added_at,
            updated_at: item.updated_at
        }
    }

    fn is(&self, status: OrderItemStatus) -> bool {
        self.status == status.as_str()
    }

    // Not yet ready and waiting past the priority threshold
    pub fn is_delayed(&self) -> bool {
        (self.is(OrderItemStatus::Pending) || self.is(OrderItemStatus::Preparing))
            && self.waiting_minutes > PRIORITY_AFTER_MINUTES
    }
}

#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct QueueCounts{
    pub pending: i64,
    pub preparing: i64,
    pub ready: i64
}

#[derive(Serialize, Debug, Default)]
pub struct KitchenQueues{
    pub counts: QueueCounts,
    pub priority: Vec<QueueEntry>,
    pub pending: Vec<QueueEntry>,
    pub preparing: Vec<QueueEntry>,
    pub ready: Vec<QueueEntry>
}

impl KitchenQueues {
    // `entries` oldest first; each queue keeps at most `length` entries
    pub fn build(entries: Vec<QueueEntry>, length: usize) -> Self {
        let mut queues = KitchenQueues::default();
        for entry in entries {
            if entry.is_delayed() {
                queues.priority.push(entry.clone());
            }
            let (count, queue) = if entry.is(OrderItemStatus::Pending) {
                (&mut queues.counts.pending, &mut queues.pending)
            } else if entry.is(OrderItemStatus::Preparing) {
                (&mut queues.counts.preparing, &mut queues.preparing)
            } else if entry.is(OrderItemStatus::Ready) {
                (&mut queues.counts.ready, &mut queues.ready)
            } else {
                continue;
            };
            *count += 1;
            if queue.len() < length {
                queue.push(entry);
            }
        }
        queues.priority.sort_by(|a, b| b.waiting_minutes.cmp(&a.waiting_minutes));
        queues
    }
}

// Pending, preparing and ready items of the restaurant's active orders, oldest first
pub(crate) fn queue_entries(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    now: DateTime<Utc>
) -> Result<Vec<QueueEntry>, diesel::result::Error> {
    let open = [
        OrderItemStatus::Pending.as_str(),
        OrderItemStatus::Preparing.as_str(),
        OrderItemStatus::Ready.as_str()
    ];

    let rows = order_items::table
        .inner_join(orders::table.left_join(dining_tables::table))
        .inner_join(menu_items::table)
        .filter(orders::restaurant_id.eq(restaurant_id))
        .filter(orders::status.eq(OrderStatus::Active.as_str()))
        .filter(order_items::status.eq_any(open))
        .order(order_items::added_at.asc())
        .select((OrderItem::as_select(), menu_items::name, dining_tables::number.nullable()))
        .load::<(OrderItem, String, Option<String>)>(conn)?;

    Ok(rows.into_iter()
        .map(|(item, name, table)| QueueEntry::new(item, name, table, now))
        .collect())
}

pub(crate) fn queue_counts(conn: &mut PgConnection, restaurant_id: Uuid) -> Result<QueueCounts, diesel::result::Error> {
    let rows = order_items::table
        .inner_join(orders::table)
        .filter(orders::restaurant_id.eq(restaurant_id))
        .filter(orders::status.eq(OrderStatus::Active.as_str()))
        .group_by(order_items::status)
        .select((order_items::status, count_star()))
        .load::<(String, i64)>(conn)?;

    let mut counts = QueueCounts::default();
    for (status, count) in rows {
        match status.parse::<OrderItemStatus>() {
            Ok(OrderItemStatus::Pending) => counts.pending = count,
            Ok(OrderItemStatus::Preparing) => counts.preparing = count,
            Ok(OrderItemStatus::Ready) => counts.ready = count,
            _ => {}
        }
    }
    Ok(counts)
}

// Mean minutes from being added to being served
pub fn average_prep_minutes(served: &[(DateTime<Utc>, DateTime<Utc>)]) -> f64 {
    if served.is_empty() {
        return 0.0;
    }
    let total: i64 = served.iter()
        .map(|(added, done)| (*done - *added).num_seconds().max(0))
        .sum();
    round_to(total as f64 / served.len() as f64 / 60.0, 1)
}

#[derive(Serialize, Debug)]
pub struct KitchenToday{
    pub completed_orders: i64,
    pub total_orders: i64,
    pub served_items: i64,
    pub avg_prep_time_minutes: f64
}

#[derive(Serialize, Debug)]
pub struct KitchenStockAlerts{
    pub low_stock_count: i64,
    pub low_stock_items: Vec<InventoryItem>
}

#[derive(Serialize, Debug)]
pub struct KitchenDashboard{
    pub restaurant: RestaurantSummary,
    pub queue_summary: QueueCounts,
    pub today: KitchenToday,
    pub priority_items: Vec<QueueEntry>,
    pub pending_queue: Vec<QueueEntry>,
    pub preparing_queue: Vec<QueueEntry>,
    pub ready_queue: Vec<QueueEntry>,
    pub inventory_alerts: KitchenStockAlerts,
    pub last_updated: DateTime<Utc>
}

#[tracing::instrument(
    "Building kitchen dashboard",
    skip(pool)
)]
pub async fn kitchen_dashboard(
    pool: &DbPool,
    restaurant_id: Uuid,
    today: NaiveDate
) -> Result<KitchenDashboard, DbError> {
    run_consistent_read(pool, move |conn| {
        let restaurant = load_restaurant(conn, restaurant_id)?;
        let now = Utc::now();
        let (start, end) = day_range(today);

        let queues = KitchenQueues::build(queue_entries(conn, restaurant_id, now)?, QUEUE_LENGTH);

        let served: Vec<(DateTime<Utc>, DateTime<Utc>)> = order_items::table
            .inner_join(orders::table)
            .filter(orders::restaurant_id.eq(restaurant_id))
            .filter(order_items::status.eq(OrderItemStatus::Served.as_str()))
            .filter(order_items::updated_at.ge(start))
            .filter(order_items::updated_at.lt(end))
            .select((order_items::added_at, order_items::updated_at))
            .load(conn)?;

        let today = KitchenToday{
            completed_orders: order_count(conn, Some(restaurant_id), start, end, Some(OrderStatus::Completed))?,
            total_orders: order_count(conn, Some(restaurant_id), start, end, None)?,
            served_items: served.len() as i64,
            avg_prep_time_minutes: average_prep_minutes(&served)
        };

        let inventory_alerts = KitchenStockAlerts{
            low_stock_count: low_stock_count(conn, Some(restaurant_id))?,
            low_stock_items: low_stock_items(conn, restaurant_id, 5)?
        };

        Ok(KitchenDashboard{
            restaurant: RestaurantSummary::from(&restaurant),
            queue_summary: queues.counts,
            today,
            priority_items: queues.priority,
            pending_queue: queues.pending,
            preparing_queue: queues.preparing,
            ready_queue: queues.ready,
            inventory_alerts,
            last_updated: now
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn entry(status: OrderItemStatus, waiting_minutes: i64) -> QueueEntry {
        let now = Utc::now();
        QueueEntry{
            order_item_id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            menu_item_name: "Dal".to_string(),
            quantity: 1,
            table_number: Some("4".to_string()),
            status: status.to_string(),
            notes: String::new(),
            added_at: now - Duration::minutes(waiting_minutes),
            updated_at: now,
            waiting_minutes
        }
    }

    #[test]
    fn queues_are_split_by_status() {
        let entries = vec![
            entry(OrderItemStatus::Pending, 5),
            entry(OrderItemStatus::Preparing, 3),
            entry(OrderItemStatus::Pending, 1),
            entry(OrderItemStatus::Ready, 2),
        ];

        let queues = KitchenQueues::build(entries, QUEUE_LENGTH);

        assert_eq!(queues.counts, QueueCounts{ pending: 2, preparing: 1, ready: 1 });
        assert_eq!(queues.pending.len(), 2);
        assert!(queues.priority.is_empty());
    }

    #[test]
    fn counts_are_not_truncated_with_the_queue() {
        let entries = (0..4).map(|_| entry(OrderItemStatus::Pending, 1)).collect();

        let queues = KitchenQueues::build(entries, 2);

        assert_eq!(queues.counts.pending, 4);
        assert_eq!(queues.pending.len(), 2);
    }

    #[test]
    fn only_unfinished_items_past_threshold_are_priority() {
        let entries = vec![
            entry(OrderItemStatus::Pending, 31),
            entry(OrderItemStatus::Preparing, 45),
            entry(OrderItemStatus::Pending, 30),
            entry(OrderItemStatus::Ready, 90),
        ];

        let queues = KitchenQueues::build(entries, QUEUE_LENGTH);

        assert_eq!(queues.priority.len(), 2);
        assert_eq!(queues.priority[0].waiting_minutes, 45);
    }

    #[test]
    fn prep_time_is_averaged_in_minutes() {
        let now = Utc::now();
        let served = vec![
            (now - Duration::minutes(10), now),
            (now - Duration::minutes(20), now),
        ];

        assert_eq!(average_prep_minutes(&served), 15.0);
        assert_eq!(average_prep_minutes(&[]), 0.0);
    }
}
