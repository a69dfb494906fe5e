use uuid::Uuid;

use crate::{
    access::{authorize_any, Action, Actor},
    db_interaction::employees::employee_restaurant_ids,
    error::ApiError,
    utils::DbPool
};

mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_staff;
pub use get::{get_staff, list_staff};
pub use post::post_staff;
pub use update::update_staff;

// Staff profiles belong to the restaurants of their employee
async fn authorize_for_employee(
    pool: &DbPool,
    actor: &Actor,
    employee_id: Uuid,
    action: Action
) -> Result<(), ApiError> {
    if employee_id == actor.employee_id && action == Action::ViewRestaurant {
        return Ok(());
    }

    let restaurants = employee_restaurant_ids(pool, employee_id).await?;
    authorize_any(actor, &restaurants, action)?;
    Ok(())
}
