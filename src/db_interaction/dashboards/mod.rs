//! Read models behind the role dashboards.
//!
//! Every aggregator runs its queries through [`run_consistent_read`], so the
//! numbers of one response come from a single snapshot of the database.
//!
//! [`run_consistent_read`]: crate::utils::run_consistent_read

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use diesel::{dsl::{count_star, sum}, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::status::{OrderStatus, SeatingStatus},
    models::{InventoryItem, Restaurant},
    schema::{dining_tables, inventory_items, menu_items, order_items, orders, restaurants},
    utils::round_to
};

pub mod admin;
pub mod owner;
pub mod analytics;
pub mod manager;
pub mod kitchen;
pub mod staff;
pub mod realtime;
pub mod vendor;

pub const TOP_ITEMS: usize = 5;

type QueryResult<T> = Result<T, diesel::result::Error>;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RestaurantSummary{
    pub restaurant_id: Uuid,
    pub name: String
}

impl From<&Restaurant> for RestaurantSummary {
    fn from(restaurant: &Restaurant) -> Self {
        RestaurantSummary{ restaurant_id: restaurant.restaurant_id, name: restaurant.name.clone() }
    }
}

pub(crate) fn load_restaurant(conn: &mut PgConnection, restaurant_id: Uuid) -> QueryResult<Restaurant> {
    restaurants::table
        .find(restaurant_id)
        .select(Restaurant::as_select())
        .first(conn)
}

// Completed revenue in [start, end), optionally for one restaurant
pub(crate) fn completed_revenue(
    conn: &mut PgConnection,
    restaurant_id: Option<Uuid>,
    start: DateTime<Utc>,
    end: DateTime<Utc>
) -> QueryResult<f64> {
    let mut query = orders::table
        .filter(orders::status.eq(OrderStatus::Completed.as_str()))
        .filter(orders::created_at.ge(start))
        .filter(orders::created_at.lt(end))
        .into_boxed();
    if let Some(id) = restaurant_id {
        query = query.filter(orders::restaurant_id.eq(id));
    }

    let revenue = query.select(sum(orders::total)).get_result::<Option<f64>>(conn)?;
    Ok(round_to(revenue.unwrap_or(0.0), 2))
}

pub(crate) fn order_count(
    conn: &mut PgConnection,
    restaurant_id: Option<Uuid>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    status: Option<OrderStatus>
) -> QueryResult<i64> {
    let mut query = orders::table
        .filter(orders::created_at.ge(start))
        .filter(orders::created_at.lt(end))
        .into_boxed();
    if let Some(id) = restaurant_id {
        query = query.filter(orders::restaurant_id.eq(id));
    }
    if let Some(status) = status {
        query = query.filter(orders::status.eq(status.as_str()));
    }

    query.select(count_star()).get_result(conn)
}

pub(crate) fn active_order_count(conn: &mut PgConnection, restaurant_id: Uuid) -> QueryResult<i64> {
    orders::table
        .filter(orders::restaurant_id.eq(restaurant_id))
        .filter(orders::status.eq(OrderStatus::Active.as_str()))
        .select(count_star())
        .get_result(conn)
}

pub fn average(total: f64, count: i64) -> f64 {
    if count > 0 { round_to(total / count as f64, 2) } else { 0.0 }
}

// Tables of a restaurant counted per seating status
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct TableBreakdown{
    pub total: i64,
    pub available: i64,
    pub occupied: i64,
    pub reserved: i64,
    pub cleaning: i64,
    pub occupancy_rate: f64
}

impl TableBreakdown {
    pub fn from_counts(rows: &[(String, i64)]) -> Self {
        let mut breakdown = TableBreakdown::default();
        for (status, count) in rows {
            breakdown.total += count;
            match status.parse::<SeatingStatus>() {
                Ok(SeatingStatus::Available) => breakdown.available += count,
                Ok(SeatingStatus::Occupied) => breakdown.occupied += count,
                Ok(SeatingStatus::Reserved) => breakdown.reserved += count,
                Ok(SeatingStatus::Cleaning) => breakdown.cleaning += count,
                Err(_) => {}
            }
        }
        if breakdown.total > 0 {
            breakdown.occupancy_rate = round_to(breakdown.occupied as f64 / breakdown.total as f64 * 100.0, 1);
        }
        breakdown
    }
}

pub(crate) fn table_breakdown(conn: &mut PgConnection, restaurant_id: Uuid) -> QueryResult<TableBreakdown> {
    let rows = dining_tables::table
        .filter(dining_tables::restaurant_id.eq(restaurant_id))
        .group_by(dining_tables::status)
        .select((dining_tables::status, count_star()))
        .load::<(String, i64)>(conn)?;

    Ok(TableBreakdown::from_counts(&rows))
}

// Items at or below their minimum, most depleted first
pub(crate) fn low_stock_items(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    limit: i64
) -> QueryResult<Vec<InventoryItem>> {
    inventory_items::table
        .filter(inventory_items::restaurant_id.eq(restaurant_id))
        .filter(inventory_items::current_stock.le(inventory_items::min_stock))
        .order(inventory_items::current_stock.asc())
        .limit(limit)
        .select(InventoryItem::as_select())
        .load(conn)
}

pub(crate) fn low_stock_count(conn: &mut PgConnection, restaurant_id: Option<Uuid>) -> QueryResult<i64> {
    let mut query = inventory_items::table
        .filter(inventory_items::current_stock.le(inventory_items::min_stock))
        .into_boxed();
    if let Some(id) = restaurant_id {
        query = query.filter(inventory_items::restaurant_id.eq(id));
    }
    query.select(count_star()).get_result(conn)
}

#[derive(Serialize, Debug)]
pub struct ExpiryAlerts{
    pub low_stock: Vec<InventoryItem>,
    pub expired: Vec<InventoryItem>,
    pub expiring_soon: Vec<InventoryItem>,
    pub total_alerts: usize
}

// Low stock, expired and expiring within `horizon_days` of `today`
pub(crate) fn expiry_alerts(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    today: NaiveDate,
    horizon_days: i64
) -> QueryResult<ExpiryAlerts> {
    let low_stock = low_stock_items(conn, restaurant_id, i64::MAX)?;

    let expired = inventory_items::table
        .filter(inventory_items::restaurant_id.eq(restaurant_id))
        .filter(inventory_items::expiry_date.le(today))
        .order(inventory_items::expiry_date.asc())
        .select(InventoryItem::as_select())
        .load(conn)?;

    let expiring_soon = inventory_items::table
        .filter(inventory_items::restaurant_id.eq(restaurant_id))
        .filter(inventory_items::expiry_date.gt(today))
        .filter(inventory_items::expiry_date.le(today + Duration::days(horizon_days)))
        .order(inventory_items::expiry_date.asc())
        .select(InventoryItem::as_select())
        .load(conn)?;

    let total_alerts = low_stock.len() + expired.len() + expiring_soon.len();
    Ok(ExpiryAlerts{ low_stock, expired, expiring_soon, total_alerts })
}

// One order line sold within a window
#[derive(Debug, Clone, PartialEq)]
pub struct SoldLine{
    pub menu_item_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TopItem{
    pub menu_item_id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64
}

// Best sellers by quantity, ties broken by revenue then name
pub fn top_items(lines: &[SoldLine], limit: usize) -> Vec<TopItem> {
    let mut by_item: HashMap<Uuid, TopItem> = HashMap::new();
    for line in lines {
        let entry = by_item.entry(line.menu_item_id).or_insert_with(|| TopItem{
            menu_item_id: line.menu_item_id,
            name: line.name.clone(),
            quantity: 0,
            revenue: 0.0
        });
        entry.quantity += i64::from(line.quantity);
        entry.revenue += line.unit_price * f64::from(line.quantity);
    }

    let mut items: Vec<TopItem> = by_item.into_values()
        .map(|item| TopItem{ revenue: round_to(item.revenue, 2), ..item })
        .collect();
    items.sort_by(|a, b| {
        b.quantity.cmp(&a.quantity)
            .then(b.revenue.total_cmp(&a.revenue))
            .then(a.name.cmp(&b.name))
    });
    items.truncate(limit);
    items
}

// Lines of non-cancelled orders of a restaurant created in [start, end)
pub(crate) fn sold_lines(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>
) -> QueryResult<Vec<SoldLine>> {
    let rows = order_items::table
        .inner_join(orders::table)
        .inner_join(menu_items::table)
        .filter(orders::restaurant_id.eq(restaurant_id))
        .filter(orders::status.ne(OrderStatus::Cancelled.as_str()))
        .filter(orders::created_at.ge(start))
        .filter(orders::created_at.lt(end))
        .select((order_items::menu_item_id, menu_items::name, order_items::quantity, order_items::unit_price))
        .load::<(Uuid, String, i32, f64)>(conn)?;

    Ok(rows.into_iter()
        .map(|(menu_item_id, name, quantity, unit_price)| SoldLine{ menu_item_id, name, quantity, unit_price })
        .collect())
}

// created_at, status and total of one order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPoint{
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub total: f64
}

impl OrderPoint {
    fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed.as_str()
    }
}

pub(crate) fn order_points(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>
) -> QueryResult<Vec<OrderPoint>> {
    let rows = orders::table
        .filter(orders::restaurant_id.eq(restaurant_id))
        .filter(orders::created_at.ge(start))
        .filter(orders::created_at.lt(end))
        .select((orders::created_at, orders::status, orders::total))
        .load::<(DateTime<Utc>, String, f64)>(conn)?;

    Ok(rows.into_iter()
        .map(|(created_at, status, total)| OrderPoint{ created_at, status, total })
        .collect())
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DayPoint{
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders: i64
}

// One point per day from `first` through `last`, empty days included.
// Orders counts every order, revenue only completed ones.
pub fn daily_series(first: NaiveDate, last: NaiveDate, points: &[OrderPoint]) -> Vec<DayPoint> {
    let mut series: Vec<DayPoint> = first.iter_days()
        .take_while(|day| *day <= last)
        .map(|date| DayPoint{ date, revenue: 0.0, orders: 0 })
        .collect();

    for point in points {
        let offset = (point.created_at.date_naive() - first).num_days();
        if let Some(day) = usize::try_from(offset).ok().and_then(|i| series.get_mut(i)) {
            day.orders += 1;
            if point.is_completed() {
                day.revenue += point.total;
            }
        }
    }

    for day in series.iter_mut() {
        day.revenue = round_to(day.revenue, 2);
    }
    series
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthPoint{
    pub month: String,
    pub revenue: f64,
    pub orders: i64
}

pub const MONTHS: u32 = 12;

// First day of the month `back` months before the month of `day`
pub fn month_start(day: NaiveDate, back: u32) -> NaiveDate {
    let index = day.year() * 12 + day.month0() as i32 - back as i32;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(day)
}

// The last twelve calendar months ending with the month of `today`, oldest first
pub fn monthly_series(today: NaiveDate, points: &[OrderPoint]) -> Vec<MonthPoint> {
    let mut series: Vec<MonthPoint> = (0..MONTHS).rev()
        .map(|back| MonthPoint{
            month: month_start(today, back).format("%Y-%m").to_string(),
            revenue: 0.0,
            orders: 0
        })
        .collect();

    for point in points {
        let key = point.created_at.format("%Y-%m").to_string();
        if let Some(month) = series.iter_mut().find(|m| m.month == key) {
            month.orders += 1;
            if point.is_completed() {
                month.revenue += point.total;
            }
        }
    }

    for month in series.iter_mut() {
        month.revenue = round_to(month.revenue, 2);
    }
    series
}
