use chrono::{DateTime, Duration, NaiveDate, Utc};
use diesel::{dsl::{count_star, sum}, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db_interaction::{day_range, stats::snapshot_for},
    domain::{percentage::change, status::{OrderStatus, VendorStatus}},
    health::HealthChange,
    models::{DailyStats, Order, Restaurant},
    schema::{employees, orders, restaurants, vendors},
    utils::{round_to, run_consistent_read, DbError, DbPool}
};

use super::{completed_revenue, low_stock_count, order_count};

#[derive(Serialize, Debug)]
pub struct AdminTotals{
    pub restaurants: i64,
    pub employees: i64,
    pub vendors: i64,
    pub orders_today: i64,
    pub revenue_today: f64
}

// Growth against the snapshot of a week ago, revenue against the same day last week
#[derive(Serialize, Debug)]
pub struct AdminChanges{
    pub restaurants: String,
    pub employees: String,
    pub vendors: String,
    pub revenue: String
}

impl AdminChanges {
    fn compute(totals: &AdminTotals, week_ago: Option<&DailyStats>, revenue_week_ago: f64) -> Self {
        let against = |current: i64, pick: fn(&DailyStats) -> i64| match week_ago {
            Some(stats) => change(current as f64, pick(stats) as f64),
            None => "0%".to_string()
        };

        AdminChanges{
            restaurants: against(totals.restaurants, |s| s.total_restaurants),
            employees: against(totals.employees, |s| s.total_employees),
            vendors: against(totals.vendors, |s| s.total_vendors),
            revenue: change(totals.revenue_today, revenue_week_ago)
        }
    }
}

#[derive(Serialize, Debug)]
pub struct RestaurantRevenue{
    pub restaurant_id: Uuid,
    pub name: String,
    pub revenue: f64,
    pub orders: i64
}

#[derive(Serialize, Debug)]
pub struct AdminAlerts{
    pub low_stock_items: i64,
    pub pending_vendors: i64
}

#[derive(Serialize, Debug)]
pub struct AdminDashboard{
    pub totals: AdminTotals,
    pub changes: AdminChanges,
    pub top_restaurants: Vec<RestaurantRevenue>,
    pub alerts: AdminAlerts,
    pub recent_restaurants: Vec<Restaurant>,
    pub recent_orders: Vec<Order>,
    pub system_health: Option<HealthChange>,
    pub last_updated: DateTime<Utc>
}

fn top_restaurants(conn: &mut PgConnection, limit: i64) -> Result<Vec<RestaurantRevenue>, diesel::result::Error> {
    let ranked = orders::table
        .filter(orders::status.eq(OrderStatus::Completed.as_str()))
        .group_by(orders::restaurant_id)
        .select((orders::restaurant_id, sum(orders::total), count_star()))
        .order(sum(orders::total).desc())
        .limit(limit)
        .load::<(Uuid, Option<f64>, i64)>(conn)?;

    let ids: Vec<Uuid> = ranked.iter().map(|(id, _, _)| *id).collect();
    let names: Vec<(Uuid, String)> = restaurants::table
        .filter(restaurants::restaurant_id.eq_any(ids))
        .select((restaurants::restaurant_id, restaurants::name))
        .load(conn)?;

    Ok(ranked.into_iter()
        .map(|(restaurant_id, revenue, orders)| RestaurantRevenue{
            restaurant_id,
            name: names.iter()
                .find(|(id, _)| *id == restaurant_id)
                .map(|(_, name)| name.clone())
                .unwrap_or_default(),
            revenue: round_to(revenue.unwrap_or(0.0), 2),
            orders
        })
        .collect())
}

#[tracing::instrument(
    "Building admin dashboard",
    skip(pool, system_health)
)]
pub async fn admin_dashboard(
    pool: &DbPool,
    today: NaiveDate,
    system_health: Option<HealthChange>
) -> Result<AdminDashboard, DbError> {
    run_consistent_read(pool, move |conn| {
        let (start, end) = day_range(today);
        let week_ago = today - Duration::days(7);
        let (week_start, week_end) = day_range(week_ago);

        let totals = AdminTotals{
            restaurants: restaurants::table.select(count_star()).get_result(conn)?,
            employees: employees::table.select(count_star()).get_result(conn)?,
            vendors: vendors::table.select(count_star()).get_result(conn)?,
            orders_today: order_count(conn, None, start, end, None)?,
            revenue_today: completed_revenue(conn, None, start, end)?
        };

        let snapshot = snapshot_for(conn, week_ago)?;
        let revenue_week_ago = completed_revenue(conn, None, week_start, week_end)?;
        let changes = AdminChanges::compute(&totals, snapshot.as_ref(), revenue_week_ago);

        let alerts = AdminAlerts{
            low_stock_items: low_stock_count(conn, None)?,
            pending_vendors: vendors::table
                .filter(vendors::status.eq(VendorStatus::PendingApproval.as_str()))
                .select(count_star())
                .get_result(conn)?
        };

        let recent_restaurants = restaurants::table
            .order(restaurants::created_at.desc())
            .limit(5)
            .select(Restaurant::as_select())
            .load(conn)?;

        let recent_orders = orders::table
            .order(orders::created_at.desc())
            .limit(10)
            .select(Order::as_select())
            .load(conn)?;

        Ok(AdminDashboard{
            totals,
            changes,
            top_restaurants: top_restaurants(conn, 5)?,
            alerts,
            recent_restaurants,
            recent_orders,
            system_health,
            last_updated: Utc::now()
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn totals(restaurants: i64, revenue_today: f64) -> AdminTotals {
        AdminTotals{ restaurants, employees: 20, vendors: 0, orders_today: 3, revenue_today }
    }

    fn snapshot(restaurants: i64) -> DailyStats {
        DailyStats{
            stat_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            total_restaurants: restaurants,
            total_employees: 20,
            total_vendors: 0,
            total_orders: 0,
            revenue: 0.0,
            created_at: Utc::now()
        }
    }

    #[test]
    fn missing_snapshot_reports_no_change() {
        let changes = AdminChanges::compute(&totals(11, 0.0), None, 0.0);

        assert_eq!(changes.restaurants, "0%");
        assert_eq!(changes.employees, "0%");
        assert_eq!(changes.revenue, "0%");
    }

    #[test]
    fn changes_compare_with_week_old_snapshot() {
        let changes = AdminChanges::compute(&totals(11, 90.0), Some(&snapshot(10)), 100.0);

        assert_eq!(changes.restaurants, "+10.0%");
        assert_eq!(changes.employees, "0%");
        assert_eq!(changes.vendors, "0%");
        assert_eq!(changes.revenue, "-10.0%");
    }
}
