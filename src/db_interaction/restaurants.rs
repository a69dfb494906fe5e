use diesel::{pg::Pg, BoolExpressionMethods, ExpressionMethods, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::status::RestaurantStatus,
    models::{Restaurant, RestaurantChanges},
    schema::restaurants,
    utils::{run_query, DbError, DbPool}
};

use super::{search_pattern, Page, Paginated};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RestaurantFilter{
    pub status: Option<RestaurantStatus>,
    pub search: Option<String>
}

fn filtered(
    filter: &RestaurantFilter,
    scope: &Option<Vec<Uuid>>
) -> restaurants::BoxedQuery<'static, Pg> {
    let mut query = restaurants::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(restaurants::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(status) = filter.status {
        query = query.filter(restaurants::status.eq(status.as_str()));
    }
    if let Some(term) = &filter.search {
        let pattern = search_pattern(term);
        query = query.filter(
            restaurants::name.ilike(pattern.clone())
                .or(restaurants::email.ilike(pattern.clone()))
                .or(restaurants::address.ilike(pattern))
        );
    }

    query
}

#[tracing::instrument(
    "Listing restaurants",
    skip(pool)
)]
pub async fn list_restaurants(
    pool: &DbPool,
    filter: RestaurantFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<Restaurant>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered(&filter, &scope)
            .order(restaurants::name.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select(Restaurant::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting restaurant by id",
    skip(pool)
)]
pub async fn get_restaurant(pool: &DbPool, restaurant_id: Uuid) -> Result<Restaurant, DbError> {
    run_query(pool, move |conn| {
        restaurants::table
            .find(restaurant_id)
            .select(Restaurant::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting restaurant",
    skip(pool)
)]
pub async fn insert_restaurant(pool: &DbPool, restaurant: Restaurant) -> Result<Restaurant, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(restaurants::table)
            .values(&restaurant)
            .returning(Restaurant::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Updating restaurant",
    skip(pool)
)]
pub async fn update_restaurant(
    pool: &DbPool,
    restaurant_id: Uuid,
    changes: RestaurantChanges
) -> Result<Restaurant, DbError> {
    run_query(pool, move |conn| {
        diesel::update(restaurants::table.find(restaurant_id))
            .set(&changes)
            .returning(Restaurant::as_returning())
            .get_result(conn)
    })
    .await
}

// Tenant data goes with it through the cascading foreign keys
#[tracing::instrument(
    "Deleting restaurant",
    skip(pool)
)]
pub async fn delete_restaurant(pool: &DbPool, restaurant_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(restaurants::table.find(restaurant_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}
