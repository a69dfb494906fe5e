use chrono::{DateTime, Duration, NaiveDate, Utc};
use diesel::{dsl::count_star, ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db_interaction::{day_range, start_of_day},
    domain::{percentage::change, status::{OrderStatus, StaffStatus}, stock::StockStatus},
    models::{Order, Restaurant},
    schema::{customers, employee_restaurants, inventory_items, orders, staff},
    utils::{run_consistent_read, DbError, DbPool}
};

use super::{
    average, completed_revenue, daily_series, load_restaurant, order_count,
    order_points, sold_lines, table_breakdown, top_items, DayPoint, TableBreakdown, TopItem, TOP_ITEMS
};

#[derive(Serialize, Debug)]
pub struct PeriodSummary{
    pub revenue: f64,
    pub orders: i64,
    pub completed_orders: i64,
    pub average_order_value: f64
}

#[derive(Serialize, Debug)]
pub struct OperationsSummary{
    pub tables: TableBreakdown,
    pub total_staff: i64,
    pub active_staff: i64,
    pub total_customers: i64
}

#[derive(Serialize, Debug)]
pub struct StockCounts{
    pub low_stock: i64,
    pub out_of_stock: i64
}

#[derive(Serialize, Debug)]
pub struct OwnerDashboard{
    pub restaurant: Restaurant,
    pub today_revenue: f64,
    pub today_orders: i64,
    pub active_orders: i64,
    pub revenue_change: String,
    pub last_30_days: PeriodSummary,
    pub operations: OperationsSummary,
    pub inventory: StockCounts,
    pub top_items: Vec<TopItem>,
    pub recent_orders: Vec<Order>,
    pub revenue_trend: Vec<DayPoint>,
    pub last_updated: DateTime<Utc>
}

#[tracing::instrument(
    "Building owner dashboard",
    skip(pool)
)]
pub async fn owner_dashboard(
    pool: &DbPool,
    restaurant_id: Uuid,
    today: NaiveDate
) -> Result<OwnerDashboard, DbError> {
    run_consistent_read(pool, move |conn| {
        let restaurant = load_restaurant(conn, restaurant_id)?;
        let rid = Some(restaurant_id);
        let (start, end) = day_range(today);
        let (week_start, week_end) = day_range(today - Duration::days(7));

        let today_revenue = completed_revenue(conn, rid, start, end)?;
        let revenue_week_ago = completed_revenue(conn, rid, week_start, week_end)?;

        let month_start = start_of_day(today - Duration::days(29));
        let month_revenue = completed_revenue(conn, rid, month_start, end)?;
        let month_orders = order_count(conn, rid, month_start, end, None)?;
        let month_completed = order_count(conn, rid, month_start, end, Some(OrderStatus::Completed))?;

        let staff_ids = employee_restaurants::table
            .filter(employee_restaurants::restaurant_id.eq(restaurant_id))
            .select(employee_restaurants::employee_id);
        let total_staff = staff::table
            .filter(staff::employee_id.eq_any(staff_ids.clone()))
            .select(count_star())
            .get_result(conn)?;
        let active_staff = staff::table
            .filter(staff::employee_id.eq_any(staff_ids))
            .filter(staff::status.eq(StaffStatus::Active.as_str()))
            .select(count_star())
            .get_result(conn)?;

        let operations = OperationsSummary{
            tables: table_breakdown(conn, restaurant_id)?,
            total_staff,
            active_staff,
            total_customers: customers::table
                .filter(customers::restaurant_id.eq(restaurant_id))
                .select(count_star())
                .get_result(conn)?
        };

        let inventory = StockCounts{
            low_stock: inventory_items::table
                .filter(inventory_items::restaurant_id.eq(restaurant_id))
                .filter(inventory_items::status.eq(StockStatus::LowStock.as_str()))
                .select(count_star())
                .get_result(conn)?,
            out_of_stock: inventory_items::table
                .filter(inventory_items::restaurant_id.eq(restaurant_id))
                .filter(inventory_items::status.eq(StockStatus::OutOfStock.as_str()))
                .select(count_star())
                .get_result(conn)?
        };

        let recent_orders = orders::table
            .filter(orders::restaurant_id.eq(restaurant_id))
            .order(orders::created_at.desc())
            .limit(10)
            .select(Order::as_select())
            .load(conn)?;

        let trend_first = today - Duration::days(6);
        let points = order_points(conn, restaurant_id, start_of_day(trend_first), end)?;

        Ok(OwnerDashboard{
            today_revenue,
            today_orders: order_count(conn, rid, start, end, None)?,
            active_orders: order_count(conn, rid, start, end, Some(OrderStatus::Active))?,
            revenue_change: change(today_revenue, revenue_week_ago),
            last_30_days: PeriodSummary{
                revenue: month_revenue,
                orders: month_orders,
                completed_orders: month_completed,
                average_order_value: average(month_revenue, month_completed)
            },
            operations,
            inventory,
            top_items: top_items(&sold_lines(conn, restaurant_id, start, end)?, TOP_ITEMS),
            recent_orders,
            revenue_trend: daily_series(trend_first, today, &points),
            restaurant,
            last_updated: Utc::now()
        })
    })
    .await
}
