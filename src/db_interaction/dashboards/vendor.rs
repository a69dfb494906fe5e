use chrono::{DateTime, Utc};
use diesel::{QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::Vendor,
    schema::vendors,
    utils::{round_to, run_consistent_read, DbError, DbPool}
};

#[derive(Serialize, Debug, PartialEq)]
pub struct VendorOverview{
    pub total_orders: i32,
    pub revenue: f64,
    pub commission_rate: f64,
    pub commission_earned: f64,
    pub rating: f64,
    pub average_order_value: f64
}

impl VendorOverview {
    pub fn of(vendor: &Vendor) -> Self {
        let average_order_value = if vendor.total_orders > 0 {
            round_to(vendor.revenue / f64::from(vendor.total_orders), 2)
        } else {
            0.0
        };

        VendorOverview{
            total_orders: vendor.total_orders,
            revenue: round_to(vendor.revenue, 2),
            commission_rate: vendor.commission,
            commission_earned: round_to(vendor.revenue * vendor.commission / 100.0, 2),
            rating: vendor.rating,
            average_order_value
        }
    }
}

#[derive(Serialize, Debug)]
pub struct VendorDashboard{
    pub overview: VendorOverview,
    pub vendor: Vendor,
    pub last_updated: DateTime<Utc>
}

#[tracing::instrument(
    "Building vendor dashboard",
    skip(pool)
)]
pub async fn vendor_dashboard(pool: &DbPool, vendor_id: Uuid) -> Result<VendorDashboard, DbError> {
    run_consistent_read(pool, move |conn| {
        let vendor = vendors::table
            .find(vendor_id)
            .select(Vendor::as_select())
            .first(conn)?;

        Ok(VendorDashboard{
            overview: VendorOverview::of(&vendor),
            vendor,
            last_updated: Utc::now()
        })
    })
    .await
}
