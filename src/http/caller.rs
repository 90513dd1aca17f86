use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::{ApiError, AppState};
use crate::domain::{Caller, UserId};

/// Header carrying the acting user's id. Token verification happens upstream;
/// the role always comes from the stored user, never from the request.
pub const USER_ID_HEADER: &str = "x-user-id";

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::unauthorized("Missing x-user-id header"))?;

        let user_id: UserId = raw
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .ok_or_else(|| ApiError::unauthorized("Invalid x-user-id header"))?;

        state
            .users
            .authenticate(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Unknown user"))
    }
}
