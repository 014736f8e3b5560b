use chrono::{DateTime, Utc};
use postgres_from_row::FromRow;

/// A rental of one car by one user.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserCar {
	pub id: i64,
	pub user_id: i64,
	pub car_id: i64,
	pub rent_started_at: DateTime<Utc>,
	pub rent_ended_at: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserCar {
	pub user_id: i64,
	pub car_id: i64,
	pub rent_started_at: DateTime<Utc>,
	pub rent_ended_at: DateTime<Utc>,
}
