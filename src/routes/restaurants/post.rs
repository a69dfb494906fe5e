use actix_web::{web, HttpResponse};

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::restaurants::insert_restaurant,
    domain::{employee_email::EmployeeEmail, phone_number::PhoneNumberDomain},
    error::ApiError,
    models::NewRestaurantForm,
    utils::DbPool
};

#[tracing::instrument(
    "Creating restaurant",
    skip(pool, actor, form)
)]
pub async fn post_restaurant(
    pool: web::Data<DbPool>,
    form: web::Json<NewRestaurantForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ManageTenants)?;

    let mut form = form.into_inner();
    form.email = EmployeeEmail::parse(form.email).map_err(ApiError::Validation)?.inner();
    form.phone = PhoneNumberDomain::parse(form.phone).map_err(ApiError::Validation)?.inner();
    let restaurant = form.into_record().map_err(ApiError::Validation)?;

    let restaurant = insert_restaurant(&pool, restaurant).await?;
    tracing::info!(restaurant_id = %restaurant.restaurant_id, "Restaurant created");

    Ok(HttpResponse::Created().json(restaurant))
}
