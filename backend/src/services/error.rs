//! HTTP mapping of portal errors.
//!
//! Every handler returns `Result<_, ApiError>`; Actix renders the error
//! through [`ResponseError`] as `{ "error": { "code", "message" } }`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::requests::ApiErrorBody;
use common::table::TableError;
use log::{error, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Table(#[from] TableError),
    /// Building a download failed after the rows were selected.
    #[error("Export failed: {0}")]
    Export(String),
}

impl ApiError {
    fn body(&self) -> ApiErrorBody {
        match self {
            ApiError::Table(err) => ApiErrorBody::from(err),
            ApiError::Export(_) => ApiErrorBody::new("export", self.to_string()),
        }
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::Export(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ApiError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ApiError::Export(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Table(TableError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Table(TableError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Table(TableError::AlreadyPending { .. }) => StatusCode::CONFLICT,
            ApiError::Table(TableError::Service(_)) | ApiError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("rejected: {}", self);
        }
        HttpResponse::build(status).json(self.body())
    }
}
