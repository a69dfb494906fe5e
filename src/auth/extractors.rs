use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::{access::{load_actor, Actor}, error::ApiError, utils::DbPool};

use super::jwt::{Claims, TokenType, Tokenizer};

// Claims of a valid access token, no database lookup
pub struct AccessClaims(pub Claims);

pub fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    let header = req.headers()
        .get("Authorization")
        .ok_or_else(|| ApiError::Unauthorized("Authentication credentials were not provided".into()))?;

    let value = header.to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid token".into()))?;

    value.strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".into()))
}

fn decode_access(req: &HttpRequest) -> Result<Claims, ApiError> {
    let tokenizer = req.app_data::<web::Data<Tokenizer>>()
        .ok_or_else(|| ApiError::Unexpected(anyhow::anyhow!("Tokenizer missing from app data")))?;
    let token = bearer_token(req)?;

    tokenizer.decode_as(token, TokenType::Access)
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".into()))
}

impl FromRequest for AccessClaims {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(decode_access(req).map(AccessClaims))
    }
}

// Resolves the token's employee and its restaurants
impl FromRequest for Actor {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = decode_access(req);
        let pool = req.app_data::<web::Data<DbPool>>().cloned();

        Box::pin(async move {
            let claims = claims?;
            let pool = pool
                .ok_or_else(|| ApiError::Unexpected(anyhow::anyhow!("Database pool missing from app data")))?;

            load_actor(&pool, claims.sub)
                .await?
                .ok_or_else(|| ApiError::Unauthorized("User not found or inactive".into()))
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use claim::{assert_err, assert_ok};

    use super::bearer_token;

    #[test]
    fn missing_header_is_rejected() {
        let req = TestRequest::default().to_http_request();
        assert_err!(bearer_token(&req));
    }

    #[test]
    fn header_without_bearer_prefix_is_rejected() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Token abc"))
            .to_http_request();
        assert_err!(bearer_token(&req));
    }

    #[test]
    fn bearer_token_is_trimmed() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer   abc.def.ghi"))
            .to_http_request();
        assert_eq!(assert_ok!(bearer_token(&req)), "abc.def.ghi");
    }

    #[test]
    fn bearer_glued_to_token_is_rejected() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearerabc.def.ghi"))
            .to_http_request();
        assert_err!(bearer_token(&req));
    }
}
