use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use serde::Serialize;
use shared::{ErrorResponse, ValidationError};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug, Serialize)]
pub enum ApiError {
    #[error("{0}")]
    Invalid(String),
    #[error("Unknown team: {0}")]
    UnknownTeam(String),
    #[error("Could not save: {0}")]
    Store(String),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Invalid(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Invalid(_) => Status::BadRequest,
            ApiError::UnknownTeam(_) => Status::NotFound,
            ApiError::Store(_) => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let body = Json(ErrorResponse::new(self.to_string()));

        rocket::Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}
