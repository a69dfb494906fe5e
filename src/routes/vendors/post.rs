use actix_web::{web, HttpResponse};

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::vendors::insert_vendor,
    error::ApiError,
    models::NewVendorForm,
    utils::DbPool
};

#[tracing::instrument(
    "Creating vendor",
    skip(pool, actor, form),
    fields(vendor_name = %form.name)
)]
pub async fn post_vendor(
    pool: web::Data<DbPool>,
    form: web::Json<NewVendorForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ManageVendors)?;

    let vendor = form.into_inner().into_record().map_err(ApiError::Validation)?;
    let vendor = insert_vendor(&pool, vendor).await?;

    Ok(HttpResponse::Created().json(vendor))
}
