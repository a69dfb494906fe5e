use diesel::{pg::Pg, BoolExpressionMethods, ExpressionMethods, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::status::{Shift, StaffStatus},
    models::{StaffChanges, StaffProfile, StaffWithEmployee},
    schema::{employee_restaurants, employees, staff},
    utils::{run_query, DbError, DbPool}
};

use super::{search_pattern, Page, Paginated};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct StaffFilter{
    pub status: Option<StaffStatus>,
    pub shift: Option<Shift>,
    pub search: Option<String>
}

type StaffRow = (StaffProfile, String, String, String, String);

fn into_view((staff, name, email, phone, role): StaffRow) -> StaffWithEmployee {
    StaffWithEmployee{ staff, name, email, phone, role }
}

fn filtered(
    filter: &StaffFilter,
    scope: &Option<Vec<Uuid>>
) -> diesel::dsl::IntoBoxed<'static, diesel::dsl::InnerJoin<staff::table, employees::table>, Pg> {
    let mut query = staff::table.inner_join(employees::table).into_boxed();

    if let Some(ids) = scope {
        query = query.filter(staff::employee_id.eq_any(
            employee_restaurants::table
                .filter(employee_restaurants::restaurant_id.eq_any(ids.clone()))
                .select(employee_restaurants::employee_id)
        ));
    }
    if let Some(status) = filter.status {
        query = query.filter(staff::status.eq(status.as_str()));
    }
    if let Some(shift) = filter.shift {
        query = query.filter(staff::shift.eq(shift.as_str()));
    }
    if let Some(term) = &filter.search {
        let pattern = search_pattern(term);
        query = query.filter(
            employees::name.ilike(pattern.clone()).or(employees::email.ilike(pattern))
        );
    }

    query
}

#[tracing::instrument(
    "Listing staff",
    skip(pool)
)]
pub async fn list_staff(
    pool: &DbPool,
    filter: StaffFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<StaffWithEmployee>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered(&filter, &scope).count().get_result::<i64>(conn)?;
        let rows = filtered(&filter, &scope)
            .order(employees::name.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select((StaffProfile::as_select(), employees::name, employees::email, employees::phone, employees::role))
            .load::<StaffRow>(conn)?;

        Ok(Paginated::new(count, page, rows.into_iter().map(into_view).collect()))
    })
    .await
}

#[tracing::instrument(
    "Getting staff by id",
    skip(pool)
)]
pub async fn get_staff(pool: &DbPool, staff_id: Uuid) -> Result<StaffWithEmployee, DbError> {
    run_query(pool, move |conn| {
        staff::table
            .inner_join(employees::table)
            .filter(staff::staff_id.eq(staff_id))
            .select((StaffProfile::as_select(), employees::name, employees::email, employees::phone, employees::role))
            .first::<StaffRow>(conn)
            .map(into_view)
    })
    .await
}

#[tracing::instrument(
    "Inserting staff profile",
    skip(pool)
)]
pub async fn insert_staff(pool: &DbPool, profile: StaffProfile) -> Result<StaffProfile, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(staff::table)
            .values(&profile)
            .returning(StaffProfile::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Updating staff profile",
    skip(pool)
)]
pub async fn update_staff(pool: &DbPool, staff_id: Uuid, changes: StaffChanges) -> Result<StaffProfile, DbError> {
    run_query(pool, move |conn| {
        diesel::update(staff::table.find(staff_id))
            .set(&changes)
            .returning(StaffProfile::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Deleting staff profile",
    skip(pool)
)]
pub async fn delete_staff(pool: &DbPool, staff_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(staff::table.find(staff_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}
