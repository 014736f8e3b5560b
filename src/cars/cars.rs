use axum::{
	extract::{
		rejection::{JsonRejection, PathRejection, QueryRejection},
		Path, Query, State,
	},
	response::{IntoResponse, Response},
	Json,
};
use chrono::{DateTime, Utc};
use hyper::StatusCode;

use super::{
	car::{Car, CarInput},
	pagination::{PageRequest, Pagination},
};
use crate::{app::AppState, error::CarError, service::CarFilter};

#[derive(serde::Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListCarsParams {
	pub page: Option<String>,
	pub page_size: Option<String>,
	pub size: Option<String>,
	pub name: Option<String>,
	pub available_at: Option<String>,
}

impl ListCarsParams {
	fn page_request(&self, default_size: i64, max_size: i64) -> PageRequest {
		PageRequest::new(lenient_int(&self.page), lenient_int(&self.page_size), default_size, max_size)
	}

	fn filter(self) -> Result<CarFilter, CarError> {
		let available_at = match non_empty(&self.available_at) {
			Some(raw) => Some(
				DateTime::parse_from_rfc3339(raw)
					.map_err(|_| CarError::validation(format!("availableAt must be an RFC 3339 timestamp (got '{raw}')")))?
					.with_timezone(&Utc),
			),
			None => None,
		};
		Ok(CarFilter {
			size: non_empty(&self.size).map(str::parse).transpose()?,
			name: self.name,
			available_at,
		})
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Empty or non-numeric paging values fall back to the defaults.
fn lenient_int(value: &Option<String>) -> Option<i64> {
	non_empty(value).and_then(|v| v.parse().ok())
}

pub(crate) fn car_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, CarError> {
	path.map(|Path(id)| id)
		.map_err(|rejection| CarError::validation(rejection.body_text()))
}

#[derive(serde::Deserialize, serde::Serialize, Debug)]
pub struct ListMeta {
	pub pagination: Pagination,
}

#[derive(serde::Deserialize, serde::Serialize, Debug)]
pub struct ListCarsResponse {
	pub cars: Vec<Car>,
	pub meta: ListMeta,
}

pub async fn list_cars(
	State(state): State<AppState>,
	query: Result<Query<ListCarsParams>, QueryRejection>,
) -> Result<Json<ListCarsResponse>, CarError> {
	let Query(params) = query.map_err(|rejection| CarError::validation(rejection.body_text()))?;
	let settings = state.service.page_settings();
	let page = params.page_request(settings.default_page_size, settings.max_page_size);
	let filter = params.filter()?;

	let page = state.service.list_cars(filter, page).await?;
	Ok(Json(ListCarsResponse {
		cars: page.items,
		meta: ListMeta { pagination: page.pagination },
	}))
}

pub async fn get_car(
	State(state): State<AppState>,
	path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Car>, CarError> {
	Ok(Json(state.service.get_car(car_id(path)?).await?))
}

pub async fn create_car(State(state): State<AppState>, payload: Result<Json<CarInput>, JsonRejection>) -> Response {
	let input = match payload {
		Ok(Json(input)) => input,
		Err(rejection) => return CarError::validation(rejection.body_text()).unprocessable(),
	};

	match state.service.create_car(input).await {
		Ok(car) => (StatusCode::CREATED, Json(car)).into_response(),
		Err(e) => e.unprocessable(),
	}
}

pub async fn update_car(
	State(state): State<AppState>,
	path: Result<Path<i64>, PathRejection>,
	payload: Result<Json<CarInput>, JsonRejection>,
) -> Response {
	let id = match car_id(path) {
		Ok(id) => id,
		Err(e) => return e.unprocessable(),
	};
	let input = match payload {
		Ok(Json(input)) => input,
		Err(rejection) => return CarError::validation(rejection.body_text()).unprocessable(),
	};

	match state.service.update_car(id, input).await {
		Ok(car) => (StatusCode::OK, Json(car)).into_response(),
		Err(e @ CarError::NotFound { .. }) => e.into_response(),
		Err(e) => e.unprocessable(),
	}
}

pub async fn delete_car(
	State(state): State<AppState>,
	path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, CarError> {
	state.service.delete_car(car_id(path)?).await?;
	Ok(StatusCode::NO_CONTENT)
}
