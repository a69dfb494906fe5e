use chrono::{NaiveDate, Utc};
use diesel::{dsl::{count_star, sum}, upsert::excluded, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{
    domain::status::OrderStatus,
    models::DailyStats,
    schema::{daily_stats, employees, orders, restaurants, vendors},
    utils::{run_query, DbError, DbPool}
};

use super::day_range;

pub fn snapshot_for(conn: &mut PgConnection, day: NaiveDate) -> Result<Option<DailyStats>, diesel::result::Error> {
    daily_stats::table
        .find(day)
        .select(DailyStats::as_select())
        .first(conn)
        .optional()
}

fn current_counts(conn: &mut PgConnection, day: NaiveDate) -> Result<DailyStats, diesel::result::Error> {
    let (start, end) = day_range(day);

    let total_restaurants = restaurants::table.select(count_star()).get_result::<i64>(conn)?;
    let total_employees = employees::table.select(count_star()).get_result::<i64>(conn)?;
    let total_vendors = vendors::table.select(count_star()).get_result::<i64>(conn)?;
    let total_orders = orders::table
        .filter(orders::created_at.ge(start))
        .filter(orders::created_at.lt(end))
        .select(count_star())
        .get_result::<i64>(conn)?;
    let revenue = orders::table
        .filter(orders::created_at.ge(start))
        .filter(orders::created_at.lt(end))
        .filter(orders::status.eq(OrderStatus::Completed.as_str()))
        .select(sum(orders::total))
        .get_result::<Option<f64>>(conn)?
        .unwrap_or(0.0);

    Ok(DailyStats{
        stat_date: day,
        total_restaurants,
        total_employees,
        total_vendors,
        total_orders,
        revenue,
        created_at: Utc::now()
    })
}

// Upserts the row for `day`, so recording twice keeps the latest numbers
#[tracing::instrument(
    "Recording daily stats snapshot",
    skip(pool)
)]
pub async fn record_snapshot(pool: &DbPool, day: NaiveDate) -> Result<DailyStats, DbError> {
    run_query(pool, move |conn| {
        let stats = current_counts(conn, day)?;

        diesel::insert_into(daily_stats::table)
            .values(&stats)
            .on_conflict(daily_stats::stat_date)
            .do_update()
            .set((
                daily_stats::total_restaurants.eq(excluded(daily_stats::total_restaurants)),
                daily_stats::total_employees.eq(excluded(daily_stats::total_employees)),
                daily_stats::total_vendors.eq(excluded(daily_stats::total_vendors)),
                daily_stats::total_orders.eq(excluded(daily_stats::total_orders)),
                daily_stats::revenue.eq(excluded(daily_stats::revenue)),
                daily_stats::created_at.eq(excluded(daily_stats::created_at))
            ))
            .returning(DailyStats::as_returning())
            .get_result(conn)
    })
    .await
}
