//! HTTP rendering of gateway errors.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use super::models::ErrorResponse;
use crate::error::GatewayError;

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(GatewayError::status_code(self))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(ResponseError::status_code(self)).json(ErrorResponse::from(self))
    }
}
