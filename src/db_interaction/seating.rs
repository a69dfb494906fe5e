use diesel::{pg::Pg, ExpressionMethods, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::status::SeatingStatus,
    models::{Chair, DiningTable, TableChanges},
    schema::{chairs, dining_tables},
    utils::{run_query, run_transaction, DbError, DbPool}
};

use super::{
    references::{collect_references, ensure_same_restaurant, Reference},
    search_pattern, Page, Paginated
};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TableFilter{
    pub status: Option<SeatingStatus>,
    pub section: Option<String>,
    pub waiter_assigned: Option<Uuid>,
    pub search: Option<String>
}

fn filtered(
    filter: &TableFilter,
    scope: &Option<Vec<Uuid>>
) -> dining_tables::BoxedQuery<'static, Pg> {
    let mut query = dining_tables::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(dining_tables::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(status) = filter.status {
        query = query.filter(dining_tables::status.eq(status.as_str()));
    }
    if let Some(section) = &filter.section {
        query = query.filter(dining_tables::section.eq(section.clone()));
    }
    if let Some(waiter) = filter.waiter_assigned {
        query = query.filter(dining_tables::waiter_assigned.eq(waiter));
    }
    if let Some(term) = &filter.search {
        query = query.filter(dining_tables::number.ilike(search_pattern(term)));
    }

    query
}

#[tracing::instrument(
    "Listing tables",
    skip(pool)
)]
pub async fn list_tables(
    pool: &DbPool,
    filter: TableFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<DiningTable>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered(&filter, &scope)
            .order(dining_tables::number.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select(DiningTable::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting table by id",
    skip(pool)
)]
pub async fn get_table(pool: &DbPool, table_id: Uuid) -> Result<DiningTable, DbError> {
    run_query(pool, move |conn| {
        dining_tables::table
            .find(table_id)
            .select(DiningTable::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting table",
    skip(pool)
)]
pub async fn insert_table(pool: &DbPool, table: DiningTable) -> Result<DiningTable, DbError> {
    run_transaction(pool, move |conn| {
        ensure_same_restaurant::<DbError>(
            conn,
            table.restaurant_id,
            &collect_references(&[table.waiter_assigned.map(Reference::Employee)])
        )?;

        Ok(diesel::insert_into(dining_tables::table)
            .values(&table)
            .returning(DiningTable::as_returning())
            .get_result(conn)?)
    })
    .await
}

#[tracing::instrument(
    "Updating table",
    skip(pool)
)]
pub async fn update_table(pool: &DbPool, table_id: Uuid, changes: TableChanges) -> Result<DiningTable, DbError> {
    run_transaction(pool, move |conn| {
        let restaurant_id = dining_tables::table
            .find(table_id)
            .select(dining_tables::restaurant_id)
            .first::<Uuid>(conn)?;
        ensure_same_restaurant::<DbError>(
            conn,
            restaurant_id,
            &collect_references(&[changes.waiter_assigned.map(Reference::Employee)])
        )?;

        Ok(diesel::update(dining_tables::table.find(table_id))
            .set(&changes)
            .returning(DiningTable::as_returning())
            .get_result(conn)?)
    })
    .await
}

#[tracing::instrument(
    "Setting table status",
    skip(pool)
)]
pub async fn set_table_status(
    pool: &DbPool,
    table_id: Uuid,
    status: SeatingStatus
) -> Result<DiningTable, DbError> {
    run_query(pool, move |conn| {
        diesel::update(dining_tables::table.find(table_id))
            .set(dining_tables::status.eq(status.as_str()))
            .returning(DiningTable::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Deleting table",
    skip(pool)
)]
pub async fn delete_table(pool: &DbPool, table_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(dining_tables::table.find(table_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}

#[tracing::instrument(
    "Listing chairs of table",
    skip(pool)
)]
pub async fn list_chairs(pool: &DbPool, table_id: Uuid) -> Result<Vec<Chair>, DbError> {
    run_query(pool, move |conn| {
        chairs::table
            .filter(chairs::table_id.eq(table_id))
            .order(chairs::number.asc())
            .select(Chair::as_select())
            .load(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting chair",
    skip(pool)
)]
pub async fn insert_chair(pool: &DbPool, chair: Chair) -> Result<Chair, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(chairs::table)
            .values(&chair)
            .returning(Chair::as_returning())
            .get_result(conn)
    })
    .await
}
