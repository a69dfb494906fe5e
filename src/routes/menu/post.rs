use actix_web::{web, HttpResponse};

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::menu::{insert_menu_category, insert_menu_item},
    error::ApiError,
    models::{NewMenuCategoryForm, NewMenuItemForm},
    utils::DbPool
};

#[tracing::instrument(
    "Creating menu category",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id)
)]
pub async fn post_menu_category(
    pool: web::Data<DbPool>,
    form: web::Json<NewMenuCategoryForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let record = form.into_record().map_err(ApiError::Validation)?;
    let record = insert_menu_category(&pool, record).await?;

    Ok(HttpResponse::Created().json(record))
}

#[tracing::instrument(
    "Creating menu item",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id)
)]
pub async fn post_menu_item(
    pool: web::Data<DbPool>,
    form: web::Json<NewMenuItemForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let record = form.into_record().map_err(ApiError::Validation)?;
    let record = insert_menu_item(&pool, record).await?;

    Ok(HttpResponse::Created().json(record))
}
