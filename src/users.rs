use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::CarError;

/// Header the upstream authentication layer fills with the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
	S: Send + Sync,
{
	type Rejection = CarError;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let Some(value) = parts.headers.get(USER_ID_HEADER) else {
			return Err(CarError::Unauthorized("no authenticated user".to_string()));
		};
		value
			.to_str()
			.ok()
			.and_then(|v| v.trim().parse().ok())
			.map(CurrentUser)
			.ok_or_else(|| CarError::Unauthorized(format!("invalid {} header", USER_ID_HEADER)))
	}
}
