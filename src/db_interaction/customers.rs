use diesel::{pg::Pg, BoolExpressionMethods, ExpressionMethods, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::status::MembershipTier,
    models::{Customer, CustomerChanges},
    schema::customers,
    utils::{run_query, DbError, DbPool}
};

use super::{search_pattern, Page, Paginated};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct CustomerFilter{
    pub membership_tier: Option<MembershipTier>,
    pub search: Option<String>
}

fn filtered(
    filter: &CustomerFilter,
    scope: &Option<Vec<Uuid>>
) -> customers::BoxedQuery<'static, Pg> {
    let mut query = customers::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(customers::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(tier) = filter.membership_tier {
        query = query.filter(customers::membership_tier.eq(tier.as_str()));
    }
    if let Some(term) = &filter.search {
        let pattern = search_pattern(term);
        query = query.filter(
            customers::name.ilike(pattern.clone())
                .or(customers::email.ilike(pattern.clone()))
                .or(customers::phone.ilike(pattern))
        );
    }

    query
}

#[tracing::instrument(
    "Listing customers",
    skip(pool)
)]
pub async fn list_customers(
    pool: &DbPool,
    filter: CustomerFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<Customer>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered(&filter, &scope)
            .order(customers::name.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select(Customer::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting customer by id",
    skip(pool)
)]
pub async fn get_customer(pool: &DbPool, customer_id: Uuid) -> Result<Customer, DbError> {
    run_query(pool, move |conn| {
        customers::table
            .find(customer_id)
            .select(Customer::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting customer",
    skip(pool)
)]
pub async fn insert_customer(pool: &DbPool, customer: Customer) -> Result<Customer, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(customers::table)
            .values(&customer)
            .returning(Customer::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Updating customer",
    skip(pool)
)]
pub async fn update_customer(
    pool: &DbPool,
    customer_id: Uuid,
    changes: CustomerChanges
) -> Result<Customer, DbError> {
    run_query(pool, move |conn| {
        diesel::update(customers::table.find(customer_id))
            .set(&changes)
            .returning(Customer::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Deleting customer",
    skip(pool)
)]
pub async fn delete_customer(pool: &DbPool, customer_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(customers::table.find(customer_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}
