//! HTTP mapping for domain errors.
//!
//! The domain [`Error`] stays transport agnostic; this module gives it a
//! status code and JSON body, and converts input validation failures into
//! `invalid_request` errors with a `field` detail.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{
    Error, ErrorCode, LoginValidationError, PetDraftValidationError, UserValidationError,
};
use crate::middleware::TRACE_ID_HEADER;

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal failures are logged in full and replaced by a generic body.
fn public_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(message = error.message(), trace_id = ?error.trace_id(), "internal error");
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(public_view(self))
    }
}

impl From<PetDraftValidationError> for Error {
    fn from(err: PetDraftValidationError) -> Self {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
    }
}

impl From<LoginValidationError> for Error {
    fn from(err: LoginValidationError) -> Self {
        let field = match err {
            LoginValidationError::EmptyUsername => "username",
            LoginValidationError::EmptyPassword => "password",
        };
        Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
    }
}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        Error::invalid_request(err.to_string())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
