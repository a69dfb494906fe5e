use diesel::{pg::Pg, ExpressionMethods, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::status::{ExpenseCategory, WasteReason},
    models::{Expense, ExpenseChanges, WasteChanges, WasteEntry},
    schema::{expenses, waste_entries},
    utils::{run_query, DbError, DbPool}
};

use super::{search_pattern, Page, Paginated};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ExpenseFilter{
    pub category: Option<ExpenseCategory>,
    pub approved: Option<bool>,
    pub recurring: Option<bool>,
    pub search: Option<String>
}

fn filtered_expenses(
    filter: &ExpenseFilter,
    scope: &Option<Vec<Uuid>>
) -> expenses::BoxedQuery<'static, Pg> {
    let mut query = expenses::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(expenses::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(category) = filter.category {
        query = query.filter(expenses::category.eq(category.as_str()));
    }
    if let Some(approved) = filter.approved {
        query = query.filter(expenses::approved.eq(approved));
    }
    if let Some(recurring) = filter.recurring {
        query = query.filter(expenses::recurring.eq(recurring));
    }
    if let Some(term) = &filter.search {
        query = query.filter(expenses::description.ilike(search_pattern(term)));
    }

    query
}

#[tracing::instrument(
    "Listing expenses",
    skip(pool)
)]
pub async fn list_expenses(
    pool: &DbPool,
    filter: ExpenseFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<Expense>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered_expenses(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered_expenses(&filter, &scope)
            .order((expenses::expense_date.desc(), expenses::created_at.desc()))
            .limit(page.limit)
            .offset(page.offset())
            .select(Expense::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting expense by id",
    skip(pool)
)]
pub async fn get_expense(pool: &DbPool, expense_id: Uuid) -> Result<Expense, DbError> {
    run_query(pool, move |conn| {
        expenses::table
            .find(expense_id)
            .select(Expense::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting expense",
    skip(pool)
)]
pub async fn insert_expense(pool: &DbPool, expense: Expense) -> Result<Expense, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(expenses::table)
            .values(&expense)
            .returning(Expense::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Updating expense",
    skip(pool)
)]
pub async fn update_expense(pool: &DbPool, expense_id: Uuid, changes: ExpenseChanges) -> Result<Expense, DbError> {
    run_query(pool, move |conn| {
        diesel::update(expenses::table.find(expense_id))
            .set(&changes)
            .returning(Expense::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Deleting expense",
    skip(pool)
)]
pub async fn delete_expense(pool: &DbPool, expense_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(expenses::table.find(expense_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct WasteFilter{
    pub reason: Option<WasteReason>,
    pub search: Option<String>
}

fn filtered_waste(
    filter: &WasteFilter,
    scope: &Option<Vec<Uuid>>
) -> waste_entries::BoxedQuery<'static, Pg> {
    let mut query = waste_entries::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(waste_entries::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(reason) = filter.reason {
        query = query.filter(waste_entries::reason.eq(reason.as_str()));
    }
    if let Some(term) = &filter.search {
        query = query.filter(waste_entries::item_name.ilike(search_pattern(term)));
    }

    query
}

#[tracing::instrument(
    "Listing waste entries",
    skip(pool)
)]
pub async fn list_waste(
    pool: &DbPool,
    filter: WasteFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<WasteEntry>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered_waste(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered_waste(&filter, &scope)
            .order((waste_entries::waste_date.desc(), waste_entries::created_at.desc()))
            .limit(page.limit)
            .offset(page.offset())
            .select(WasteEntry::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting waste entry by id",
    skip(pool)
)]
pub async fn get_waste(pool: &DbPool, waste_id: Uuid) -> Result<WasteEntry, DbError> {
    run_query(pool, move |conn| {
        waste_entries::table
            .find(waste_id)
            .select(WasteEntry::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting waste entry",
    skip(pool)
)]
pub async fn insert_waste(pool: &DbPool, entry: WasteEntry) -> Result<WasteEntry, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(waste_entries::table)
            .values(&entry)
            .returning(WasteEntry::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Updating waste entry",
    skip(pool)
)]
pub async fn update_waste(pool: &DbPool, waste_id: Uuid, changes: WasteChanges) -> Result<WasteEntry, DbError> {
    run_query(pool, move |conn| {
        diesel::update(waste_entries::table.find(waste_id))
            .set(&changes)
            .returning(WasteEntry::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Deleting waste entry",
    skip(pool)
)]
pub async fn delete_waste(pool: &DbPool, waste_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(waste_entries::table.find(waste_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}
