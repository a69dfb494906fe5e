use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::menu,
    error::ApiError,
    utils::DbPool
};

#[tracing::instrument(
    "Deleting menu category",
    skip(pool, actor)
)]
pub async fn delete_menu_category(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let category_id = path.into_inner();
    let current = menu::get_menu_category(&pool, category_id)
        .await
        .map_err(ApiError::entity("Menu category"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    menu::delete_menu_category(&pool, category_id)
        .await
        .map_err(ApiError::entity("Menu category"))?;

    Ok(HttpResponse::NoContent().finish())
}

#[tracing::instrument(
    "Deleting menu item",
    skip(pool, actor)
)]
pub async fn delete_menu_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let menu_item_id = path.into_inner();
    let current = menu::get_menu_item(&pool, menu_item_id)
        .await
        .map_err(ApiError::entity("Menu item"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    menu::delete_menu_item(&pool, menu_item_id)
        .await
        .map_err(ApiError::entity("Menu item"))?;

    Ok(HttpResponse::NoContent().finish())
}
