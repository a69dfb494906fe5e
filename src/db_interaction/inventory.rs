use chrono::Utc;
use diesel::{pg::Pg, BoolExpressionMethods, Connection, ExpressionMethods, PgConnection, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::stock::{StockAction, StockStatus},
    models::{InventoryCategory, InventoryItem, InventoryItemChanges},
    schema::{inventory_categories, inventory_items},
    utils::{run_query, run_transaction, DbError, DbPool}
};

use super::{
    references::{collect_references, ensure_same_restaurant, Reference},
    search_pattern, Page, Paginated
};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct InventoryCategoryFilter{
    pub search: Option<String>
}

#[tracing::instrument(
    "Listing inventory categories",
    skip(pool)
)]
pub async fn list_inventory_categories(
    pool: &DbPool,
    filter: InventoryCategoryFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<InventoryCategory>, DbError> {
    let build = move || {
        let mut query = inventory_categories::table.into_boxed::<Pg>();
        if let Some(ids) = &scope {
            query = query.filter(inventory_categories::restaurant_id.eq_any(ids.clone()));
        }
        if let Some(term) = &filter.search {
            query = query.filter(inventory_categories::name.ilike(search_pattern(term)));
        }
        query
    };

    run_query(pool, move |conn| {
        let count = build().count().get_result::<i64>(conn)?;
        let results = build()
            .order(inventory_categories::name.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select(InventoryCategory::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Inserting inventory category",
    skip(pool)
)]
pub async fn insert_inventory_category(
    pool: &DbPool,
    category: InventoryCategory
) -> Result<InventoryCategory, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(inventory_categories::table)
            .values(&category)
            .returning(InventoryCategory::as_returning())
            .get_result(conn)
    })
    .await
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct InventoryItemFilter{
    pub status: Option<StockStatus>,
    pub category_id: Option<Uuid>,
    pub search: Option<String>
}

fn filtered_items(
    filter: &InventoryItemFilter,
    scope: &Option<Vec<Uuid>>
) -> inventory_items::BoxedQuery<'static, Pg> {
    let mut query = inventory_items::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(inventory_items::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(status) = filter.status {
        query = query.filter(inventory_items::status.eq(status.as_str()));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(inventory_items::category_id.eq(category_id));
    }
    if let Some(term) = &filter.search {
        let pattern = search_pattern(term);
        query = query.filter(
            inventory_items::name.ilike(pattern.clone())
                .or(inventory_items::supplier.ilike(pattern))
        );
    }

    query
}

#[tracing::instrument(
    "Listing inventory items",
    skip(pool)
)]
pub async fn list_inventory_items(
    pool: &DbPool,
    filter: InventoryItemFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<InventoryItem>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered_items(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered_items(&filter, &scope)
            .order(inventory_items::name.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select(InventoryItem::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting inventory item by id",
    skip(pool)
)]
pub async fn get_inventory_item(pool: &DbPool, item_id: Uuid) -> Result<InventoryItem, DbError> {
    run_query(pool, move |conn| {
        inventory_items::table
            .find(item_id)
            .select(InventoryItem::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting inventory item",
    skip(pool)
)]
pub async fn insert_inventory_item(pool: &DbPool, item: InventoryItem) -> Result<InventoryItem, DbError> {
    run_transaction(pool, move |conn| {
        ensure_same_restaurant::<DbError>(
            conn,
            item.restaurant_id,
            &collect_references(&[item.category_id.map(Reference::InventoryCategory)])
        )?;

        Ok(diesel::insert_into(inventory_items::table)
            .values(&item)
            .returning(InventoryItem::as_returning())
            .get_result(conn)?)
    })
    .await
}

// Writes the derived status back when the stored one is stale
fn refresh_status(conn: &mut PgConnection, mut item: InventoryItem) -> Result<InventoryItem, diesel::result::Error> {
    let status = item.stock_status(Utc::now().date_naive());

    if item.status != status.as_str() {
        item = diesel::update(inventory_items::table.find(item.item_id))
            .set(inventory_items::status.eq(status.as_str()))
            .returning(InventoryItem::as_returning())
            .get_result(conn)?;
    }

    Ok(item)
}

#[tracing::instrument(
    "Updating inventory item",
    skip(pool)
)]
pub async fn update_inventory_item(
    pool: &DbPool,
    item_id: Uuid,
    changes: InventoryItemChanges
) -> Result<InventoryItem, DbError> {
    run_transaction(pool, move |conn| {
        let restaurant_id = inventory_items::table
            .find(item_id)
            .select(inventory_items::restaurant_id)
            .first::<Uuid>(conn)?;
        ensure_same_restaurant::<DbError>(
            conn,
            restaurant_id,
            &collect_references(&[changes.category_id.map(Reference::InventoryCategory)])
        )?;

        let item = diesel::update(inventory_items::table.find(item_id))
            .set((&changes, inventory_items::updated_at.eq(Utc::now())))
            .returning(InventoryItem::as_returning())
            .get_result(conn)?;

        Ok(refresh_status(conn, item)?)
    })
    .await
}

// Stock change and status recompute commit together
#[tracing::instrument(
    "Updating inventory stock",
    skip(pool)
)]
pub async fn update_stock(
    pool: &DbPool,
    item_id: Uuid,
    action: StockAction,
    quantity: f64
) -> Result<InventoryItem, DbError> {
    run_query(pool, move |conn| {
        conn.transaction(|conn| {
            let item = inventory_items::table
                .find(item_id)
                .select(InventoryItem::as_select())
                .for_update()
                .first(conn)?;

            let now = Utc::now();
            let current_stock = action.apply(item.current_stock, quantity);
            let last_restocked = match action {
                StockAction::Add => Some(now),
                StockAction::Subtract => item.last_restocked
            };

            let item = diesel::update(inventory_items::table.find(item_id))
                .set((
                    inventory_items::current_stock.eq(current_stock),
                    inventory_items::last_restocked.eq(last_restocked),
                    inventory_items::updated_at.eq(now)
                ))
                .returning(InventoryItem::as_returning())
                .get_result(conn)?;

            refresh_status(conn, item)
        })
    })
    .await
}

#[tracing::instrument(
    "Deleting inventory item",
    skip(pool)
)]
pub async fn delete_inventory_item(pool: &DbPool, item_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(inventory_items::table.find(item_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}
