use diesel::{pg::Pg, BoolExpressionMethods, ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::status::NotificationKind,
    models::Notification,
    schema::notifications,
    utils::{run_query, DbError, DbPool}
};

use super::{Page, Paginated};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct NotificationFilter{
    pub read: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<NotificationKind>
}

// Restaurant-wide notifications in scope plus the ones addressed to `employee_id`
fn filtered(
    filter: &NotificationFilter,
    scope: &Option<Vec<Uuid>>,
    employee_id: Uuid
) -> notifications::BoxedQuery<'static, Pg> {
    let mut query = notifications::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(
            notifications::restaurant_id.eq_any(ids.clone())
                .or(notifications::employee_id.eq(employee_id))
        );
    }
    if let Some(read) = filter.read {
        query = query.filter(notifications::read.eq(read));
    }
    if let Some(kind) = filter.kind {
        query = query.filter(notifications::kind.eq(kind.as_str()));
    }

    query
}

#[tracing::instrument(
    "Listing notifications",
    skip(pool)
)]
pub async fn list_notifications(
    pool: &DbPool,
    filter: NotificationFilter,
    scope: Option<Vec<Uuid>>,
    employee_id: Uuid,
    page: Page
) -> Result<Paginated<Notification>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered(&filter, &scope, employee_id).count().get_result::<i64>(conn)?;
        let results = filtered(&filter, &scope, employee_id)
            .order(notifications::created_at.desc())
            .limit(page.limit)
            .offset(page.offset())
            .select(Notification::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

#[tracing::instrument(
    "Getting notification by id",
    skip(pool)
)]
pub async fn get_notification(pool: &DbPool, notification_id: Uuid) -> Result<Notification, DbError> {
    run_query(pool, move |conn| {
        notifications::table
            .find(notification_id)
            .select(Notification::as_select())
            .first(conn)
    })
    .await
}

#[tracing::instrument(
    "Inserting notification",
    skip(pool)
)]
pub async fn insert_notification(pool: &DbPool, notification: Notification) -> Result<Notification, DbError> {
    run_query(pool, move |conn| {
        diesel::insert_into(notifications::table)
            .values(&notification)
            .returning(Notification::as_returning())
            .get_result(conn)
    })
    .await
}

#[tracing::instrument(
    "Marking notification as read",
    skip(pool)
)]
pub async fn mark_read(pool: &DbPool, notification_id: Uuid) -> Result<Notification, DbError> {
    run_query(pool, move |conn| {
        diesel::update(notifications::table.find(notification_id))
            .set(notifications::read.eq(true))
            .returning(Notification::as_returning())
            .get_result(conn)
    })
    .await
}

/// Notifications of an employee: addressed to it or to one of its restaurants
#[tracing::instrument(
    "Getting notifications of employee",
    skip(pool)
)]
pub async fn notifications_for_employee(
    pool: &DbPool,
    employee_id: Uuid,
    restaurant_ids: Vec<Uuid>,
    mark_read: bool
) -> Result<Vec<Notification>, DbError> {
    run_query(pool, move |conn| {
        let visible = notifications::employee_id.eq(employee_id)
            .or(notifications::restaurant_id.eq_any(restaurant_ids.clone()).and(notifications::employee_id.is_null()));

        let results = notifications::table
            .filter(visible)
            .order(notifications::created_at.desc())
            .limit(50)
            .select(Notification::as_select())
            .load(conn)?;

        if mark_read {
            let ids: Vec<Uuid> = results.iter().map(|n| n.notification_id).collect();
            diesel::update(notifications::table.filter(notifications::notification_id.eq_any(ids)))
                .set(notifications::read.eq(true))
                .execute(conn)?;
        }

        Ok(results)
    })
    .await
}
