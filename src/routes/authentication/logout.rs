use actix_web::HttpResponse;
use serde_json::json;

use crate::auth::extractors::AccessClaims;

// Tokens are not tracked server side, the client drops them
#[tracing::instrument(
    "Logging out employee",
    skip_all,
    fields(employee_id = %claims.0.sub)
)]
pub async fn logout(
    claims: AccessClaims
) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Successfully logged out" }))
}
