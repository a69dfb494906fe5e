use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::menu,
    error::ApiError,
    models::{MenuCategoryChanges, MenuItemChanges},
    utils::DbPool
};

#[tracing::instrument(
    "Updating menu category",
    skip(pool, actor, changes)
)]
pub async fn update_menu_category(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<MenuCategoryChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let category_id = path.into_inner();
    let current = menu::get_menu_category(&pool, category_id)
        .await
        .map_err(ApiError::entity("Menu category"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let changes = changes.into_inner();
    let record = menu::update_menu_category(&pool, category_id, changes)
        .await
        .map_err(ApiError::entity("Menu category"))?;

    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    "Updating menu item",
    skip(pool, actor, changes)
)]
pub async fn update_menu_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<MenuItemChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let menu_item_id = path.into_inner();
    let current = menu::get_menu_item(&pool, menu_item_id)
        .await
        .map_err(ApiError::entity("Menu item"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;
    let record = menu::update_menu_item(&pool, menu_item_id, changes)
        .await
        .map_err(ApiError::entity("Menu item"))?;

    Ok(HttpResponse::Ok().json(record))
}
