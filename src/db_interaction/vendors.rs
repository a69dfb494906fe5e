use diesel::{pg::Pg, BoolExpressionMethods, ExpressionMethods, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::status::{VendorStatus, VendorType},
    models::{Vendor, VendorChanges},
    schema::vendors,
    utils::{run_query, DbError, DbPool}
};

use super::{search_pattern, Page, Paginated};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct VendorFilter{
    pub status: Option<VendorStatus>,
    pub vendor_type: Option<VendorType>,
    pub search: Option<String>
}

fn filtered(filter: &VendorFilter) -> vendors::BoxedQuery<'static, Pg> {
    let mut query = vendors::table.into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(vendors::status.eq(status.as_str()));
    }
    if let Some(vendor_type) = filter.vendor_type {
        query = query.filter(vendors::vendor_type.eq(vendor_type.as_str()));
    }
    if let Some(term) = &filter.search {
        let pattern = search_pattern(term);
        query = query.filter(
            vendors::name.ilike(pattern.clone()).or(vendors::email.ilike(pattern))
        );
    }

    query
}

#[tracing::instrument(
    "Listing vendors",
    skip(pool)
)]
pub async fn list_vendors(
    pool: &DbPool,
    filter: VendorFilter,
    page: Page
) -> Result<Paginated<Vendor>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered(&filter).count().get_result::<i64>(conn)?;
        let results = filtered(&filter)
            .order(vendors::name.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select(Vendor::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting vendor by id",
    skip(pool)
)]
pub async fn get_vendor(pool: &DbPool, vendor_id: Uuid) -> Result<Vendor, DbError> {
    run_query(pool, move |conn| {
        vendors::table
            .find(vendor_id)
            .select(Vendor::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting vendor",
    skip(pool)
)]
pub async fn insert_vendor(pool: &DbPool, vendor: Vendor) -> Result<Vendor, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(vendors::table)
            .values(&vendor)
            .returning(Vendor::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Updating vendor",
    skip(pool)
)]
pub async fn update_vendor(pool: &DbPool, vendor_id: Uuid, changes: VendorChanges) -> Result<Vendor, DbError> {
    run_query(pool, move |conn| {
        diesel::update(vendors::table.find(vendor_id))
            .set(&changes)
            .returning(Vendor::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Deleting vendor",
    skip(pool)
)]
pub async fn delete_vendor(pool: &DbPool, vendor_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(vendors::table.find(vendor_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}
