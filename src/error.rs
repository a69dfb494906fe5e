use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use diesel::result::DatabaseErrorKind;
use serde_json::json;
use thiserror::Error;

use crate::{access::AccessDenied, db_interaction::orders::OrderError, utils::{error_fmt_chain, DbError}};

// Errors surfaced by request handlers, rendered as {"error": ...}
#[derive(Error)]
pub enum ApiError{
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    Unexpected(#[source] anyhow::Error)
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if let ApiError::Unexpected(_) = self {
            tracing::error!(error = ?self, "Request failed");
        }

        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<AccessDenied> for ApiError {
    fn from(value: AccessDenied) -> Self {
        ApiError::Forbidden(value.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        ApiError::from_db(value, "Resource")
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(format!("{} not found", entity))
    }

    // Maps database failures, naming `entity` when a row is missing
    pub fn from_db(error: DbError, entity: &str) -> Self {
        use diesel::result::Error as DieselError;

        match error {
            DbError::QueryError(DieselError::NotFound) => ApiError::not_found(entity),
            DbError::QueryError(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
                ApiError::Validation(format!("Duplicate value: {}", info.message()))
            },
            DbError::QueryError(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info)) => {
                ApiError::Validation(format!("Referenced record does not exist: {}", info.message()))
            },
            DbError::QueryError(DieselError::QueryBuilderError(_)) => {
                ApiError::validation("No fields to update")
            },
            DbError::ForeignReference(reference) => ApiError::Validation(reference.to_string()),
            other => ApiError::Unexpected(anyhow::Error::new(other))
        }
    }

    // Closure form for `map_err`
    pub fn entity(entity: &'static str) -> impl Fn(DbError) -> ApiError {
        move |error| ApiError::from_db(error, entity)
    }
}

impl From<OrderError> for ApiError {
    fn from(value: OrderError) -> Self {
        match value {
            OrderError::UnknownMenuItem(_)
            | OrderError::Unavailable(_)
            | OrderError::ForeignReference(_) => ApiError::Validation(value.to_string()),
            OrderError::QueryError(e) => ApiError::from_db(DbError::QueryError(e), "Order"),
            OrderError::PoolError(e) => ApiError::from(DbError::PoolError(e)),
            OrderError::ThreadpoolError(e) => ApiError::from(DbError::ThreadpoolError(e))
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        ApiError::Unexpected(value)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, ResponseError};

    use super::ApiError;
    use crate::{db_interaction::references::ForeignReference, utils::DbError};

    #[test]
    fn missing_row_maps_to_not_found() {
        let err = ApiError::from_db(DbError::QueryError(diesel::result::Error::NotFound), "Order");

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Order not found");
    }

    #[test]
    fn empty_changeset_is_a_bad_request() {
        let err = ApiError::from(DbError::QueryError(
            diesel::result::Error::QueryBuilderError("There are no changes to save".into())
        ));

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn foreign_reference_is_a_bad_request() {
        let id = uuid::Uuid::new_v4();
        let err = ApiError::from(DbError::ForeignReference(ForeignReference{ entity: "Table", id }));

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), format!("Table {} does not belong to this restaurant", id));
    }

    #[test]
    fn unexpected_errors_hide_their_cause() {
        let err = ApiError::Unexpected(anyhow::anyhow!("connection refused on 10.0.0.1"));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }
}
