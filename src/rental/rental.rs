use axum::{
	extract::{
		rejection::{JsonRejection, PathRejection},
		Path, State,
	},
	Json,
};
use chrono::{DateTime, Utc};
use hyper::StatusCode;

use super::user_car::UserCar;
use crate::{app::AppState, cars::cars::car_id, error::CarError, users::CurrentUser};

#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RentRequest {
	pub rent_started_at: Option<DateTime<Utc>>,
	pub rent_ended_at: Option<DateTime<Utc>>,
}

// Every failure goes back through `CarError::into_response`; nothing is
// rendered here.
pub async fn rent_car(
	State(state): State<AppState>,
	path: Result<Path<i64>, PathRejection>,
	CurrentUser(user_id): CurrentUser,
	payload: Result<Json<RentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserCar>), CarError> {
	let id = car_id(path)?;
	let Json(request) = payload.map_err(|rejection| CarError::validation(rejection.body_text()))?;
	let Some(rent_started_at) = request.rent_started_at else {
		return Err(CarError::validation("rentStartedAt is required"));
	};

	let rental = state
		.service
		.rent_car(id, user_id, rent_started_at, request.rent_ended_at)
		.await?;
	Ok((StatusCode::CREATED, Json(rental)))
}
