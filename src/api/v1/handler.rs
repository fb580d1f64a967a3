use super::error::*;
use crate::application_port::ProfileService;
use crate::domain_model::UserId;
use serde::Serialize;
use std::sync::Arc;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

pub async fn get_profile(
    user_id: String,
    profile_service: Arc<dyn ProfileService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    // path params arrive percent-encoded
    let user_id: UserId = urlencoding::decode(&user_id)
        .ok()
        .and_then(|decoded| decoded.parse().ok())
        .ok_or_else(|| reject::custom(ApiErrorCode::InvalidUserId))?;

    let profile = profile_service
        .resolve(&user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(profile)))
}
