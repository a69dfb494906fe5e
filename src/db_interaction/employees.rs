use chrono::Utc;
use diesel::{pg::Pg, BoolExpressionMethods, Connection, ExpressionMethods, OptionalExtension, PgConnection, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::{role::Role, status::EmployeeStatus},
    models::{Employee, EmployeeChangeset, EmployeeRestaurant, EmployeeWithRestaurants, Restaurant, StaffProfile},
    schema::{employee_restaurants, employees, restaurants, staff},
    utils::{run_query, DbError, DbPool}
};

use super::{search_pattern, Page, Paginated};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct EmployeeFilter{
    pub role: Option<Role>,
    pub status: Option<EmployeeStatus>,
    pub search: Option<String>
}

fn filtered(
    filter: &EmployeeFilter,
    scope: &Option<Vec<Uuid>>
) -> employees::BoxedQuery<'static, Pg> {
    let mut query = employees::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(employees::employee_id.eq_any(
            employee_restaurants::table
                .filter(employee_restaurants::restaurant_id.eq_any(ids.clone()))
                .select(employee_restaurants::employee_id)
        ));
    }
    if let Some(role) = filter.role {
        query = query.filter(employees::role.eq(role.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(employees::status.eq(status.as_str()));
    }
    if let Some(term) = &filter.search {
        let pattern = search_pattern(term);
        query = query.filter(
            employees::name.ilike(pattern.clone())
                .or(employees::email.ilike(pattern.clone()))
                .or(employees::phone.ilike(pattern))
        );
    }

    query
}

pub fn restaurant_ids_of(conn: &mut PgConnection, employee_id: Uuid) -> Result<Vec<Uuid>, diesel::result::Error> {
    employee_restaurants::table
        .filter(employee_restaurants::employee_id.eq(employee_id))
        .select(employee_restaurants::restaurant_id)
        .load(conn)
}

fn with_restaurants(
    conn: &mut PgConnection,
    employee: Employee
) -> Result<EmployeeWithRestaurants, diesel::result::Error> {
    let restaurants = restaurant_ids_of(conn, employee.employee_id)?;
    Ok(EmployeeWithRestaurants{ employee, restaurants })
}

fn link_restaurants(
    conn: &mut PgConnection,
    employee_id: Uuid,
    restaurant_ids: &[Uuid]
) -> Result<(), diesel::result::Error> {
    let links: Vec<EmployeeRestaurant> = restaurant_ids
        .iter()
        .map(|restaurant_id| EmployeeRestaurant{ employee_id, restaurant_id: *restaurant_id })
        .collect();

    diesel::insert_into(employee_restaurants::table)
        .values(&links)
        .on_conflict_do_nothing()
        .execute(conn)?;

    Ok(())
}

#[tracing::instrument(
    "Listing employees",
    skip(pool)
)]
pub async fn list_employees(
    pool: &DbPool,
    filter: EmployeeFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<EmployeeWithRestaurants>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered(&filter, &scope).count().get_result::<i64>(conn)?;
        let rows = filtered(&filter, &scope)
            .order(employees::name.asc())
            .limit(page.limit)
            .offset(page.offset())
            .select(Employee::as_select())
            .load(conn)?;

        let results = rows
            .into_iter()
            .map(|employee| with_restaurants(conn, employee))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting employee by id",
    skip(pool)
)]
pub async fn get_employee(pool: &DbPool, employee_id: Uuid) -> Result<EmployeeWithRestaurants, DbError> {
    run_query(pool, move |conn| {
        let employee = employees::table
            .find(employee_id)
            .select(Employee::as_select())
            .first(conn)?;

        with_restaurants(conn, employee)
    })
    .await
}

#[tracing::instrument(
    "Inserting employee with restaurant links",
    skip(pool, employee),
    fields(email = %employee.email)
)]
pub async fn insert_employee(
    pool: &DbPool,
    employee: Employee,
    restaurant_ids: Vec<Uuid>
) -> Result<EmployeeWithRestaurants, DbError> {
    run_query(pool, move |conn| {
        conn.transaction(|conn| {
            let employee = diesel::insert_into(employees::table)
                .values(&employee)
                .returning(Employee::as_returning())
                .get_result(conn)?;

            link_restaurants(conn, employee.employee_id, &restaurant_ids)?;
            with_restaurants(conn, employee)
        })
    })
    .await
}

// `restaurant_ids` replaces the current links when given
#[tracing::instrument(
    "Updating employee",
    skip(pool, changes)
)]
pub async fn update_employee(
    pool: &DbPool,
    employee_id: Uuid,
    mut changes: EmployeeChangeset,
    restaurant_ids: Option<Vec<Uuid>>
) -> Result<EmployeeWithRestaurants, DbError> {
    changes.updated_at = Some(Utc::now());

    run_query(pool, move |conn| {
        conn.transaction(|conn| {
            let employee = diesel::update(employees::table.find(employee_id))
                .set(&changes)
                .returning(Employee::as_returning())
                .get_result(conn)?;

            if let Some(restaurant_ids) = restaurant_ids {
                diesel::delete(
                    employee_restaurants::table.filter(employee_restaurants::employee_id.eq(employee_id))
                )
                .execute(conn)?;
                link_restaurants(conn, employee_id, &restaurant_ids)?;
            }

            with_restaurants(conn, employee)
        })
    })
    .await
}

#[tracing::instrument(
    "Deleting employee",
    skip(pool)
)]
pub async fn delete_employee(pool: &DbPool, employee_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(employees::table.find(employee_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}

/// Everything the login and verify endpoints report about an employee
#[derive(Debug)]
pub struct EmployeeAccount{
    pub employee: Employee,
    pub restaurants: Vec<Restaurant>,
    pub staff_profile: Option<StaffProfile>
}

fn load_account(conn: &mut PgConnection, employee: Employee) -> Result<EmployeeAccount, diesel::result::Error> {
    let restaurants = restaurants::table
        .inner_join(employee_restaurants::table)
        .filter(employee_restaurants::employee_id.eq(employee.employee_id))
        .order(restaurants::name.asc())
        .select(Restaurant::as_select())
        .load(conn)?;

    let staff_profile = staff::table
        .filter(staff::employee_id.eq(employee.employee_id))
        .select(StaffProfile::as_select())
        .first(conn)
        .optional()?;

    Ok(EmployeeAccount{ employee, restaurants, staff_profile })
}

// Login lookup: only employees whose role is in `roles`
#[tracing::instrument(
    "Finding employee for login",
    skip(pool)
)]
pub async fn find_account_by_email(
    pool: &DbPool,
    email: String,
    roles: &'static [Role]
) -> Result<Option<EmployeeAccount>, DbError> {
    let role_names: Vec<&'static str> = roles.iter().map(|r| r.as_str()).collect();

    run_query(pool, move |conn| {
        let employee = employees::table
            .filter(employees::email.eq(&email))
            .filter(employees::role.eq_any(role_names))
            .select(Employee::as_select())
            .first(conn)
            .optional()?;

        match employee {
            Some(employee) => load_account(conn, employee).map(Some),
            None => Ok(None)
        }
    })
    .await
}

#[tracing::instrument(
    "Loading employee account",
    skip(pool)
)]
pub async fn get_account(pool: &DbPool, employee_id: Uuid) -> Result<EmployeeAccount, DbError> {
    run_query(pool, move |conn| {
        let employee = employees::table
            .find(employee_id)
            .select(Employee::as_select())
            .first(conn)?;

        load_account(conn, employee)
    })
    .await
}

#[tracing::instrument(
    "Stamping employee login",
    skip(pool)
)]
pub async fn touch_employee(pool: &DbPool, employee_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        diesel::update(employees::table.find(employee_id))
            .set(employees::updated_at.eq(Utc::now()))
            .execute(conn)
            .map(|_| ())
    })
    .await
}

#[tracing::instrument(
    "Checking for an admin account",
    skip(pool)
)]
pub async fn admin_exists(pool: &DbPool) -> Result<bool, DbError> {
    run_query(pool, |conn| {
        diesel::select(diesel::dsl::exists(
            employees::table.filter(employees::role.eq(Role::Admin.as_str()))
        ))
        .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Getting restaurants of employee",
    skip(pool)
)]
pub async fn employee_restaurant_ids(pool: &DbPool, employee_id: Uuid) -> Result<Vec<Uuid>, DbError> {
    run_query(pool, move |conn| restaurant_ids_of(conn, employee_id)).await
}
