use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    access::{visible_restaurants, Actor},
    db_interaction::{notifications::{self, NotificationFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

#[tracing::instrument(
    "Listing notifications",
    skip(pool, actor)
)]
pub async fn list_notifications(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<NotificationFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let notifications = notifications::list_notifications(
        &pool,
        filter.into_inner(),
        scope,
        actor.employee_id,
        page.page()
    )
    .await?;

    Ok(HttpResponse::Ok().json(notifications))
}

#[derive(Deserialize, Debug)]
pub struct MyNotificationsQuery{
    #[serde(default)]
    pub mark_read: bool
}

// GET /dashboard/notifications/me/
#[tracing::instrument(
    "Getting notifications of caller",
    skip(pool, actor),
    fields(employee_id = %actor.employee_id)
)]
pub async fn my_notifications(
    pool: web::Data<DbPool>,
    query: web::Query<MyNotificationsQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let notifications = notifications::notifications_for_employee(
        &pool,
        actor.employee_id,
        actor.restaurants.clone(),
        query.mark_read
    )
    .await?;
    let unread_count = notifications.iter().filter(|n| !n.read).count();

    Ok(HttpResponse::Ok().json(json!({
        "notifications": notifications,
        "unread_count": unread_count
    })))
}
