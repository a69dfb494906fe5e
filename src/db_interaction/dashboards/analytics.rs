use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use diesel::{dsl::count_star, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db_interaction::{day_range, start_of_day},
    domain::{percentage::change, status::{OrderStatus, VendorStatus}},
    models::Vendor,
    schema::{customers, vendors},
    utils::{run_consistent_read, DbError, DbPool}
};

use super::{
    average, completed_revenue, daily_series, expiry_alerts, load_restaurant, month_start,
    monthly_series, order_count, order_points, sold_lines, top_items, DayPoint, ExpiryAlerts,
    MonthPoint, TopItem, MONTHS, TOP_ITEMS
};

pub const DEFAULT_ANALYTICS_DAYS: i64 = 30;
pub const MAX_ANALYTICS_DAYS: i64 = 365;
pub const EXPIRY_ALERT_DAYS: i64 = 7;

#[derive(Deserialize, Debug, Default)]
pub struct AnalyticsQuery{
    pub days: Option<i64>
}

impl AnalyticsQuery {
    pub fn window_days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_ANALYTICS_DAYS).clamp(1, MAX_ANALYTICS_DAYS)
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Period{
    pub days: i64,
    pub start: NaiveDate,
    pub end: NaiveDate
}

impl Period {
    // `days` calendar days ending with `today`
    pub fn ending(today: NaiveDate, days: i64) -> Self {
        Period{ days, start: today - Duration::days(days - 1), end: today }
    }

    // The window of equal length right before this one
    pub fn previous(&self) -> Self {
        Period::ending(self.start - Duration::days(1), self.days)
    }

    fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (start_of_day(self.start), day_range(self.end).1)
    }
}

#[derive(Serialize, Debug)]
pub struct Growth{
    pub revenue: String,
    pub orders: String,
    pub customers: String
}

#[derive(Serialize, Debug)]
pub struct RestaurantAnalytics{
    pub restaurant_id: Uuid,
    pub period: Period,
    pub revenue: f64,
    pub orders: i64,
    pub average_order_value: f64,
    pub new_customers: i64,
    pub growth: Growth,
    pub top_items: Vec<TopItem>,
    pub daily: Vec<DayPoint>,
    pub monthly: Vec<MonthPoint>,
    pub last_updated: DateTime<Utc>
}

fn new_customers(conn: &mut PgConnection, restaurant_id: Uuid, period: &Period) -> Result<i64, diesel::result::Error> {
    let (start, end) = period.bounds();
    customers::table
        .filter(customers::restaurant_id.eq(restaurant_id))
        .filter(customers::created_at.ge(start))
        .filter(customers::created_at.lt(end))
        .select(count_star())
        .get_result(conn)
}

#[tracing::instrument(
    "Building restaurant analytics",
    skip(pool)
)]
pub async fn restaurant_analytics(
    pool: &DbPool,
    restaurant_id: Uuid,
    today: NaiveDate,
    days: i64
) -> Result<RestaurantAnalytics, DbError> {
    run_consistent_read(pool, move |conn| {
        load_restaurant(conn, restaurant_id)?;
        let rid = Some(restaurant_id);

        let period = Period::ending(today, days);
        let previous = period.previous();
        let (start, end) = period.bounds();
        let (prev_start, prev_end) = previous.bounds();

        let revenue = completed_revenue(conn, rid, start, end)?;
        let orders = order_count(conn, rid, start, end, None)?;
        let completed = order_count(conn, rid, start, end, Some(OrderStatus::Completed))?;
        let customers_now = new_customers(conn, restaurant_id, &period)?;

        let growth = Growth{
            revenue: change(revenue, completed_revenue(conn, rid, prev_start, prev_end)?),
            orders: change(orders as f64, order_count(conn, rid, prev_start, prev_end, None)? as f64),
            customers: change(customers_now as f64, new_customers(conn, restaurant_id, &previous)? as f64)
        };

        let daily_points = order_points(conn, restaurant_id, start, end)?;
        let year_start = start_of_day(month_start(today, MONTHS - 1));
        let monthly_points = order_points(conn, restaurant_id, year_start, end)?;

        Ok(RestaurantAnalytics{
            restaurant_id,
            revenue,
            orders,
            average_order_value: average(revenue, completed),
            new_customers: customers_now,
            growth,
            top_items: top_items(&sold_lines(conn, restaurant_id, start, end)?, TOP_ITEMS),
            daily: daily_series(period.start, period.end, &daily_points),
            monthly: monthly_series(today, &monthly_points),
            period,
            last_updated: Utc::now()
        })
    })
    .await
}

#[derive(Serialize, Debug)]
pub struct InventoryAlerts{
    pub restaurant_id: Uuid,
    #[serde(flatten)]
    pub alerts: ExpiryAlerts,
    pub last_updated: DateTime<Utc>
}

#[tracing::instrument(
    "Building inventory alerts",
    skip(pool)
)]
pub async fn inventory_alerts(
    pool: &DbPool,
    restaurant_id: Uuid,
    today: NaiveDate
) -> Result<InventoryAlerts, DbError> {
    run_consistent_read(pool, move |conn| {
        load_restaurant(conn, restaurant_id)?;

        Ok(InventoryAlerts{
            restaurant_id,
            alerts: expiry_alerts(conn, restaurant_id, today, EXPIRY_ALERT_DAYS)?,
            last_updated: Utc::now()
        })
    })
    .await
}

pub const TOP_RATED_MIN: f64 = 4.0;

#[derive(Serialize, Debug)]
pub struct RestaurantVendors{
    pub restaurant_id: Uuid,
    pub total_active: i64,
    pub by_type: BTreeMap<String, i64>,
    pub top_rated: Vec<Vendor>,
    pub vendors: Vec<Vendor>,
    pub last_updated: DateTime<Utc>
}

// Vendors are global, the restaurant only frames the view
#[tracing::instrument(
    "Building restaurant vendor overview",
    skip(pool)
)]
pub async fn restaurant_vendors(pool: &DbPool, restaurant_id: Uuid) -> Result<RestaurantVendors, DbError> {
    run_consistent_read(pool, move |conn| {
        load_restaurant(conn, restaurant_id)?;
        let active = VendorStatus::Active.as_str();

        let by_type = vendors::table
            .filter(vendors::status.eq(active))
            .group_by(vendors::vendor_type)
            .select((vendors::vendor_type, count_star()))
            .load::<(String, i64)>(conn)?
            .into_iter()
            .collect::<BTreeMap<_, _>>();

        let top_rated = vendors::table
            .filter(vendors::status.eq(active))
            .filter(vendors::rating.ge(TOP_RATED_MIN))
            .order((vendors::rating.desc(), vendors::name.asc()))
            .limit(5)
            .select(Vendor::as_select())
            .load(conn)?;

        let listed = vendors::table
            .filter(vendors::status.eq(active))
            .order(vendors::name.asc())
            .limit(20)
            .select(Vendor::as_select())
            .load(conn)?;

        Ok(RestaurantVendors{
            restaurant_id,
            total_active: by_type.values().sum(),
            by_type,
            top_rated,
            vendors: listed,
            last_updated: Utc::now()
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_defaults_to_thirty_days_and_is_clamped() {
        assert_eq!(AnalyticsQuery{ days: None }.window_days(), 30);
        assert_eq!(AnalyticsQuery{ days: Some(0) }.window_days(), 1);
        assert_eq!(AnalyticsQuery{ days: Some(1000) }.window_days(), 365);
    }

    #[test]
    fn period_includes_today() {
        let period = Period::ending(day(2025, 7, 10), 7);

        assert_eq!(period.start, day(2025, 7, 4));
        assert_eq!(period.end, day(2025, 7, 10));
    }

    #[test]
    fn previous_period_is_adjacent_and_same_length() {
        let previous = Period::ending(day(2025, 7, 10), 7).previous();

        assert_eq!(previous, Period{ days: 7, start: day(2025, 6, 27), end: day(2025, 7, 3) });
    }
}
