use std::{sync::Arc, time::Instant};

use axum::{
	extract::Request,
	http::{Method, Uri},
	middleware::{self, Next},
	response::Response,
	routing::{get, post},
	Json, Router,
};
use hyper::StatusCode;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::{cars::cars, rental::rental, service::CarService};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CarService>,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(root))
		.route("/v1/cars", get(cars::list_cars).post(cars::create_car))
		.route("/v1/cars/:id", get(cars::get_car).put(cars::update_car).delete(cars::delete_car))
		.route("/v1/cars/:id/rent", post(rental::rent_car))
		.fallback(not_found)
		.layer(middleware::from_fn(log_requests))
		.layer(CorsLayer::permissive())
		.with_state(state)
}

async fn root() -> Json<Value> {
	Json(json!({
		"status": "OK",
		"message": "BCR API is up and running!",
	}))
}

async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
	let body = json!({
		"error": {
			"name": "Error",
			"message": "Not found!",
			"details": { "method": method.as_str(), "url": uri.to_string() },
		}
	});
	(StatusCode::NOT_FOUND, Json(body))
}

async fn log_requests(request: Request, next: Next) -> Response {
	let method = request.method().clone();
	let uri = request.uri().clone();
	let start = Instant::now();

	let response = next.run(request).await;

	let status = response.status();
	let elapsed = start.elapsed().as_millis();
	if status.is_server_error() {
		log::error!("{} {} -> {} ({} ms)", method, uri, status, elapsed);
	} else if status.is_client_error() {
		log::warn!("{} {} -> {} ({} ms)", method, uri, status, elapsed);
	} else {
		log::info!("{} {} -> {} ({} ms)", method, uri, status, elapsed);
	}
	response
}
