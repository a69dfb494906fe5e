use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::{notifications, restaurants::get_restaurant},
    error::ApiError,
    models::NewNotificationForm,
    utils::DbPool
};

// POST /dashboard/notifications/{restaurant_id}/
#[tracing::instrument(
    "Creating notification",
    skip(pool, actor, form)
)]
pub async fn post_notification(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<NewNotificationForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ManageRestaurantData)?;
    get_restaurant(&pool, restaurant_id)
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    let notification = form.into_inner().into_record(restaurant_id).map_err(ApiError::Validation)?;
    let notification = notifications::insert_notification(&pool, notification).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Notification created successfully",
        "notification_id": notification.notification_id
    })))
}

// POST /api/notifications/{id}/mark-read/
#[tracing::instrument(
    "Marking notification as read",
    skip(pool, actor)
)]
pub async fn mark_notification_read(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let notification_id = path.into_inner();
    let notification = notifications::get_notification(&pool, notification_id)
        .await
        .map_err(ApiError::entity("Notification"))?;

    if notification.employee_id != Some(actor.employee_id) {
        let scope = match notification.restaurant_id {
            Some(restaurant_id) => Scope::Restaurant(restaurant_id),
            None => Scope::Global
        };
        authorize(&actor, scope, Action::ViewRestaurant)?;
    }

    let notification = notifications::mark_read(&pool, notification_id)
        .await
        .map_err(ApiError::entity("Notification"))?;

    Ok(HttpResponse::Ok().json(notification))
}
