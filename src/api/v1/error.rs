use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use crate::domain_port::ProfileStoreError;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message) = if let Some(code) = err.find::<ApiErrorCode>() {
        (code.clone(), code.to_string())
    } else if err.is_not_found() {
        (ApiErrorCode::NotFound, ApiErrorCode::NotFound.to_string())
    } else {
        let message = format!("Unhandled error: {:?}", err);
        (ApiErrorCode::internal(&message), message)
    };

    let status = code.status();
    let json = warp::reply::json(&ApiResponse::<()>::err(code, message));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
pub enum ApiErrorCode {
    #[error("User id must not be empty")]
    InvalidUserId,
    #[error("Profile is not available")]
    ProfileUnavailable,
    #[error("Not found")]
    NotFound,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::InvalidUserId => StatusCode::BAD_REQUEST,
            ApiErrorCode::ProfileUnavailable => StatusCode::FORBIDDEN,
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<ResolutionError> for ApiErrorCode {
    fn from(error: ResolutionError) -> Self {
        match error {
            ResolutionError::IdentityUnavailable {
                source: ProfileStoreError::NotFound,
                ..
            } => ApiErrorCode::ProfileUnavailable,
            ResolutionError::IdentityUnavailable { .. } => {
                warn!("{}", error);
                ApiErrorCode::ProfileUnavailable
            }
        }
    }
}
