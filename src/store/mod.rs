//! Data access for cars and rentals.
//!
//! The service only ever sees these traits; `postgres` backs them with
//! tokio-postgres and `memory` keeps everything in process.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
	cars::car::{Car, CarPatch, NewCar, Size},
	rental::user_car::{NewUserCar, UserCar},
};

/// Criteria for `find_all` and `count`. `count` ignores `limit` and `offset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarQuery {
	pub size: Option<Size>,
	/// Case-insensitive substring of the car name.
	pub name: Option<String>,
	/// Only join rentals that end at or after this instant.
	pub available_at: Option<DateTime<Utc>>,
	pub limit: Option<i64>,
	pub offset: i64,
}

#[async_trait]
pub trait CarModel: Send + Sync {
	/// Cars matching `query`, ordered by id.
	async fn find_all(&self, query: &CarQuery) -> anyhow::Result<Vec<Car>>;

	async fn count(&self, query: &CarQuery) -> anyhow::Result<i64>;

	async fn find_by_pk(&self, id: i64) -> anyhow::Result<Option<Car>>;

	async fn create(&self, car: NewCar) -> anyhow::Result<Car>;

	/// Persists `patch` over `car` and returns the stored result.
	async fn update(&self, car: &Car, patch: &CarPatch) -> anyhow::Result<Car>;

	/// Returns the number of rows removed.
	async fn destroy(&self, id: i64) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait UserCarModel: Send + Sync {
	/// A rental of `car_id` that ends after `at`, if any.
	async fn find_active(&self, car_id: i64, at: DateTime<Utc>) -> anyhow::Result<Option<UserCar>>;

	async fn create(&self, rental: NewUserCar) -> anyhow::Result<UserCar>;
}
