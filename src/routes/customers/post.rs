use actix_web::{web, HttpResponse};

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::customers::insert_customer,
    error::ApiError,
    models::NewCustomerForm,
    utils::DbPool
};

#[tracing::instrument(
    "Creating customer",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id)
)]
pub async fn post_customer(
    pool: web::Data<DbPool>,
    form: web::Json<NewCustomerForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let record = form.into_record().map_err(ApiError::Validation)?;
    let record = insert_customer(&pool, record).await?;

    Ok(HttpResponse::Created().json(record))
}
