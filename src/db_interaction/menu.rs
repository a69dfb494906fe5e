use diesel::{pg::Pg, BoolExpressionMethods, ExpressionMethods, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    models::{MenuCategory, MenuCategoryChanges, MenuItem, MenuItemChanges},
    schema::{menu_categories, menu_items},
    utils::{run_query, run_transaction, DbError, DbPool}
};

use super::{
    references::{collect_references, ensure_same_restaurant, Reference},
    search_pattern, Page, Paginated
};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct MenuCategoryFilter{
    pub is_active: Option<bool>,
    pub search: Option<String>
}

fn filtered_categories(
    filter: &MenuCategoryFilter,
    scope: &Option<Vec<Uuid>>
) -> menu_categories::BoxedQuery<'static, Pg> {
    let mut query = menu_categories::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(menu_categories::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(menu_categories::is_active.eq(is_active));
    }
    if let Some(term) = &filter.search {
        query = query.filter(menu_categories::name.ilike(search_pattern(term)));
    }

    query
}

#[tracing::instrument(
    "Listing menu categories",
    skip(pool)
)]
pub async fn list_menu_categories(
    pool: &DbPool,
    filter: MenuCategoryFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<MenuCategory>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered_categories(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered_categories(&filter, &scope)
            .order((menu_categories::sort_order.asc(), menu_categories::name.asc()))
            .limit(page.limit)
            .offset(page.offset())
            .select(MenuCategory::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting menu category by id",
    skip(pool)
)]
pub async fn get_menu_category(pool: &DbPool, category_id: Uuid) -> Result<MenuCategory, DbError> {
    run_query(pool, move |conn| {
        menu_categories::table
            .find(category_id)
            .select(MenuCategory::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting menu category",
    skip(pool)
)]
pub async fn insert_menu_category(pool: &DbPool, category: MenuCategory) -> Result<MenuCategory, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(menu_categories::table)
            .values(&category)
            .returning(MenuCategory::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Updating menu category",
    skip(pool)
)]
pub async fn update_menu_category(
    pool: &DbPool,
    category_id: Uuid,
    changes: MenuCategoryChanges
) -> Result<MenuCategory, DbError> {
    run_query(pool, move |conn| {
        diesel::update(menu_categories::table.find(category_id))
            .set(&changes)
            .returning(MenuCategory::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Deleting menu category",
    skip(pool)
)]
pub async fn delete_menu_category(pool: &DbPool, category_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(menu_categories::table.find(category_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct MenuItemFilter{
    pub category_id: Option<Uuid>,
    pub available: Option<bool>,
    pub is_vegan: Option<bool>,
    pub is_gluten_free: Option<bool>,
    pub search: Option<String>
}

fn filtered_items(
    filter: &MenuItemFilter,
    scope: &Option<Vec<Uuid>>
) -> menu_items::BoxedQuery<'static, Pg> {
    let mut query = menu_items::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(menu_items::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(menu_items::category_id.eq(category_id));
    }
    if let Some(available) = filter.available {
        query = query.filter(menu_items::available.eq(available));
    }
    if let Some(is_vegan) = filter.is_vegan {
        query = query.filter(menu_items::is_vegan.eq(is_vegan));
    }
    if let Some(is_gluten_free) = filter.is_gluten_free {
        query = query.filter(menu_items::is_gluten_free.eq(is_gluten_free));
    }
    if let Some(term) = &filter.search {
        let pattern = search_pattern(term);
        query = query.filter(
            menu_items::name.ilike(pattern.clone()).or(menu_items::description.ilike(pattern))
        );
    }

    query
}

#[tracing::instrument(
    "Listing menu items",
    skip(pool)
)]
pub async fn list_menu_items(
    pool: &DbPool,
    filter: MenuItemFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<MenuItem>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered_items(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered_items(&filter, &scope)
            .order(menu_items::name.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select(MenuItem::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting menu item by id",
    skip(pool)
)]
pub async fn get_menu_item(pool: &DbPool, menu_item_id: Uuid) -> Result<MenuItem, DbError> {
    run_query(pool, move |conn| {
        menu_items::table
            .find(menu_item_id)
            .select(MenuItem::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting menu item",
    skip(pool)
)]
pub async fn insert_menu_item(pool: &DbPool, item: MenuItem) -> Result<MenuItem, DbError> {
    run_transaction(pool, move |conn| {
        ensure_same_restaurant::<DbError>(
            conn,
            item.restaurant_id,
            &collect_references(&[item.category_id.map(Reference::MenuCategory)])
        )?;

        Ok(diesel::insert_into(menu_items::table)
            .values(&item)
            .returning(MenuItem::as_returning())
            .get_result(conn)?)
    })
    .await
}

#[tracing::instrument(
    "Updating menu item",
    skip(pool)
)]
pub async fn update_menu_item(
    pool: &DbPool,
    menu_item_id: Uuid,
    changes: MenuItemChanges
) -> Result<MenuItem, DbError> {
    run_transaction(pool, move |conn| {
        let restaurant_id = menu_items::table
            .find(menu_item_id)
            .select(menu_items::restaurant_id)
            .first::<Uuid>(conn)?;
        ensure_same_restaurant::<DbError>(
            conn,
            restaurant_id,
            &collect_references(&[changes.category_id.map(Reference::MenuCategory)])
        )?;

        Ok(diesel::update(menu_items::table.find(menu_item_id))
            .set(&changes)
            .returning(MenuItem::as_returning())
            .get_result(conn)?)
    })
    .await
}

#[tracing::instrument(
    "Deleting menu item",
    skip(pool)
)]
pub async fn delete_menu_item(pool: &DbPool, menu_item_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(menu_items::table.find(menu_item_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}
