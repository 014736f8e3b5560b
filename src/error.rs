use axum::{
	response::{IntoResponse, Response},
	Json,
};
use hyper::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::cars::car::Car;

#[derive(Debug, Error)]
pub enum CarError {
	#[error("{message}")]
	Validation { message: String },

	#[error("car {id} not found")]
	NotFound { id: i64 },

	#[error("{} is already rented!!", .car.name)]
	AlreadyRented { car: Box<Car> },

	#[error("{0}")]
	Unauthorized(String),

	#[error(transparent)]
	Store(#[from] anyhow::Error),
}

impl CarError {
	pub fn validation(message: impl Into<String>) -> Self {
		CarError::Validation { message: message.into() }
	}

	pub fn name(&self) -> &'static str {
		match self {
			CarError::Validation { .. } => "ValidationError",
			CarError::NotFound { .. } => "NotFoundError",
			CarError::AlreadyRented { .. } => "CarAlreadyRentedError",
			CarError::Unauthorized(_) => "UnauthorizedError",
			CarError::Store(_) => "Error",
		}
	}

	pub fn status_code(&self) -> StatusCode {
		match self {
			CarError::Validation { .. } | CarError::AlreadyRented { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			CarError::NotFound { .. } => StatusCode::NOT_FOUND,
			CarError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
			CarError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn details(&self) -> Value {
		match self {
			CarError::NotFound { id } => json!({ "id": id }),
			CarError::AlreadyRented { car } => json!({ "car": car }),
			_ => Value::Null,
		}
	}

	/// Renders the error inline as 422, whatever its kind. Used by the write
	/// handlers, which report store failures to the client directly.
	pub fn unprocessable(self) -> Response {
		log::debug!("{}: {}", self.name(), self);
		let body = json!({
			"error": {
				"name": self.name(),
				"message": self.to_string(),
			}
		});
		(StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
	}
}

/// The shared error handler: every `Err` a handler returns ends up here.
impl IntoResponse for CarError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		match &self {
			CarError::Store(e) => log::error!("store failure: {:#}", e),
			CarError::AlreadyRented { car } => log::warn!("rejected rental of car {}: already rented", car.id),
			other => log::debug!("{}: {}", other.name(), other),
		}
		let message = match &self {
			CarError::Store(_) => "Internal server error".to_string(),
			other => other.to_string(),
		};
		let body = json!({
			"error": {
				"name": self.name(),
				"message": message,
				"details": self.details(),
			}
		});
		(status, Json(body)).into_response()
	}
}
