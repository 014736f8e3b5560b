use async_trait::async_trait;
use chrono::{DateTime, Utc};
use postgres_from_row::FromRow;
use tokio_postgres::Row;

use super::{CarModel, CarQuery, UserCarModel};
use crate::{
	cars::car::{Car, CarPatch, NewCar},
	db_client::DbClient,
	rental::user_car::{NewUserCar, UserCar},
};

const CAR_COLUMNS: &str = "id, name, price, size, image, is_currently_rented, created_at, updated_at";

// $3 optionally limits the joined rental to ones ending at or after it.
const LIST_CARS: &str = "
SELECT c.id, c.name, c.price, c.size, c.image, c.is_currently_rented, c.created_at, c.updated_at,
	uc.id AS uc_id, uc.user_id AS uc_user_id, uc.car_id AS uc_car_id,
	uc.rent_started_at AS uc_rent_started_at, uc.rent_ended_at AS uc_rent_ended_at,
	uc.created_at AS uc_created_at, uc.updated_at AS uc_updated_at
FROM cars c
LEFT JOIN LATERAL (
	SELECT * FROM user_cars r
	WHERE r.car_id = c.id AND ($3::timestamptz IS NULL OR r.rent_ended_at >= $3)
	ORDER BY r.rent_ended_at DESC
	LIMIT 1
) uc ON TRUE
WHERE ($1::text IS NULL OR c.size = $1)
	AND ($2::text IS NULL OR strpos(lower(c.name), lower($2)) > 0)
ORDER BY c.id
LIMIT $4 OFFSET $5";

const COUNT_CARS: &str = "
SELECT count(*) FROM cars c
WHERE ($1::text IS NULL OR c.size = $1)
	AND ($2::text IS NULL OR strpos(lower(c.name), lower($2)) > 0)";

const GET_CAR: &str = "
SELECT c.id, c.name, c.price, c.size, c.image, c.is_currently_rented, c.created_at, c.updated_at,
	uc.id AS uc_id, uc.user_id AS uc_user_id, uc.car_id AS uc_car_id,
	uc.rent_started_at AS uc_rent_started_at, uc.rent_ended_at AS uc_rent_ended_at,
	uc.created_at AS uc_created_at, uc.updated_at AS uc_updated_at
FROM cars c
LEFT JOIN LATERAL (
	SELECT * FROM user_cars r WHERE r.car_id = c.id ORDER BY r.rent_ended_at DESC LIMIT 1
) uc ON TRUE
WHERE c.id = $1";

const USER_CAR_COLUMNS: &str = "id, user_id, car_id, rent_started_at, rent_ended_at, created_at, updated_at";

fn car_columns(row: &Row) -> anyhow::Result<Car> {
	let size: String = row.try_get("size")?;
	Ok(Car {
		id: row.try_get("id")?,
		name: row.try_get("name")?,
		price: row.try_get("price")?,
		size: size.parse()?,
		image: row.try_get("image")?,
		is_currently_rented: row.try_get("is_currently_rented")?,
		created_at: row.try_get("created_at")?,
		updated_at: row.try_get("updated_at")?,
		user_car: None,
	})
}

/// Maps a row of `LIST_CARS` / `GET_CAR`, including the joined rental.
fn car_with_rental(row: &Row) -> anyhow::Result<Car> {
	let mut car = car_columns(row)?;
	if let Some(id) = row.try_get::<_, Option<i64>>("uc_id")? {
		car.user_car = Some(UserCar {
			id,
			user_id: row.try_get("uc_user_id")?,
			car_id: row.try_get("uc_car_id")?,
			rent_started_at: row.try_get("uc_rent_started_at")?,
			rent_ended_at: row.try_get("uc_rent_ended_at")?,
			created_at: row.try_get("uc_created_at")?,
			updated_at: row.try_get("uc_updated_at")?,
		});
	}
	Ok(car)
}

pub struct PgCarModel {
	db: DbClient,
}

impl PgCarModel {
	pub fn new(db: DbClient) -> Self {
		PgCarModel { db }
	}
}

#[async_trait]
impl CarModel for PgCarModel {
	async fn find_all(&self, query: &CarQuery) -> anyhow::Result<Vec<Car>> {
		let size = query.size.map(|s| s.as_str());
		let rows = self
			.db
			.query(LIST_CARS, &[&size, &query.name, &query.available_at, &query.limit, &query.offset])
			.await?;
		rows.iter().map(car_with_rental).collect()
	}

	async fn count(&self, query: &CarQuery) -> anyhow::Result<i64> {
		let size = query.size.map(|s| s.as_str());
		let row = self.db.query_one(COUNT_CARS, &[&size, &query.name]).await?;
		Ok(row.try_get(0)?)
	}

	async fn find_by_pk(&self, id: i64) -> anyhow::Result<Option<Car>> {
		let row = self.db.query_opt(GET_CAR, &[&id]).await?;
		row.as_ref().map(car_with_rental).transpose()
	}

	async fn create(&self, car: NewCar) -> anyhow::Result<Car> {
		let statement = format!(
			"INSERT INTO cars (name, price, size, image, is_currently_rented) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
			CAR_COLUMNS
		);
		let row = self
			.db
			.query_one(
				statement.as_str(),
				&[&car.name, &car.price, &car.size.as_str(), &car.image, &car.is_currently_rented],
			)
			.await?;
		car_columns(&row)
	}

	async fn update(&self, car: &Car, patch: &CarPatch) -> anyhow::Result<Car> {
		let merged = patch.apply(car);
		let statement = format!(
			"UPDATE cars SET name = $2, price = $3, size = $4, image = $5, is_currently_rented = $6, updated_at = now() WHERE id = $1 RETURNING {}",
			CAR_COLUMNS
		);
		let row = self
			.db
			.query_opt(
				statement.as_str(),
				&[&car.id, &merged.name, &merged.price, &merged.size.as_str(), &merged.image, &merged.is_currently_rented],
			)
			.await?
			.ok_or_else(|| anyhow::anyhow!("car {} disappeared during update", car.id))?;
		Ok(Car {
			user_car: car.user_car.clone(),
			..car_columns(&row)?
		})
	}

	async fn destroy(&self, id: i64) -> anyhow::Result<u64> {
		Ok(self.db.execute("DELETE FROM cars WHERE id = $1", &[&id]).await?)
	}
}

pub struct PgUserCarModel {
	db: DbClient,
}

impl PgUserCarModel {
	pub fn new(db: DbClient) -> Self {
		PgUserCarModel { db }
	}
}

#[async_trait]
impl UserCarModel for PgUserCarModel {
	async fn find_active(&self, car_id: i64, at: DateTime<Utc>) -> anyhow::Result<Option<UserCar>> {
		let statement = format!(
			"SELECT {} FROM user_cars WHERE car_id = $1 AND rent_ended_at > $2 ORDER BY rent_ended_at DESC LIMIT 1",
			USER_CAR_COLUMNS
		);
		let row = self.db.query_opt(statement.as_str(), &[&car_id, &at]).await?;
		Ok(row.as_ref().map(UserCar::try_from_row).transpose()?)
	}

	async fn create(&self, rental: NewUserCar) -> anyhow::Result<UserCar> {
		let statement = format!(
			"INSERT INTO user_cars (user_id, car_id, rent_started_at, rent_ended_at) VALUES ($1, $2, $3, $4) RETURNING {}",
			USER_CAR_COLUMNS
		);
		let row = self
			.db
			.query_one(
				statement.as_str(),
				&[&rental.user_id, &rental.car_id, &rental.rent_started_at, &rental.rent_ended_at],
			)
			.await?;
		Ok(UserCar::try_from_row(&row)?)
	}
}

#[cfg(test)]
mod tests {
	use chrono::Duration;

	use super::*;
	use crate::{cars::car::Size, db_client::db_client};

	// Needs a disposable database: DATABASE_URL=... cargo test -- --ignored
	async fn connect() -> Option<DbClient> {
		let url = std::env::var("DATABASE_URL").ok()?;
		let db = db_client(&url).await.unwrap();
		db.migrate().await.unwrap();
		Some(db)
	}

	fn new_car(name: &str, size: Size) -> NewCar {
		NewCar {
			name: name.to_string(),
			price: 100000,
			size,
			image: format!("{name}.png"),
			is_currently_rented: false,
		}
	}

	#[tokio::test]
	#[ignore]
	async fn car_and_rental_queries_against_postgres() {
		let Some(db) = connect().await else {
			return;
		};
		let cars = PgCarModel::new(db.clone());
		let rentals = PgUserCarModel::new(db);
		let tag = format!("pgtest-{}", Utc::now().timestamp_micros());

		let small = cars.create(new_car(&format!("{tag} Ayla"), Size::Small)).await.unwrap();
		let large = cars.create(new_car(&format!("{tag} Alphard"), Size::Large)).await.unwrap();
		assert!(large.id > small.id);

		let by_name = CarQuery { name: Some(tag.to_uppercase()), ..Default::default() };
		assert_eq!(cars.count(&by_name).await.unwrap(), 2);
		let all = cars.find_all(&by_name).await.unwrap();
		assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![small.id, large.id]);

		let large_only = CarQuery { size: Some(Size::Large), ..by_name.clone() };
		assert_eq!(cars.find_all(&large_only).await.unwrap(), vec![large.clone()]);

		let second_page = CarQuery { limit: Some(1), offset: 1, ..by_name.clone() };
		assert_eq!(cars.find_all(&second_page).await.unwrap()[0].id, large.id);
		assert_eq!(cars.count(&second_page).await.unwrap(), 2);

		let start = Utc::now();
		let rental = rentals
			.create(NewUserCar {
				user_id: 9,
				car_id: small.id,
				rent_started_at: start,
				rent_ended_at: start + Duration::days(1),
			})
			.await
			.unwrap();
		assert_eq!(rentals.find_active(small.id, start).await.unwrap().map(|r| r.id), Some(rental.id));
		assert!(rentals.find_active(small.id, start + Duration::days(1)).await.unwrap().is_none());

		let fetched = cars.find_by_pk(small.id).await.unwrap().unwrap();
		assert_eq!(fetched.user_car.map(|r| r.id), Some(rental.id));

		let later = CarQuery { available_at: Some(start + Duration::days(2)), ..by_name.clone() };
		assert!(cars.find_all(&later).await.unwrap().iter().all(|c| c.user_car.is_none()));

		let patch = CarPatch { price: Some(250000), ..Default::default() };
		let updated = cars.update(&large, &patch).await.unwrap();
		assert_eq!(updated.price, 250000);
		assert_eq!(updated.name, large.name);

		assert_eq!(cars.destroy(small.id).await.unwrap(), 1);
		assert_eq!(cars.destroy(small.id).await.unwrap(), 0);
		assert!(cars.find_by_pk(small.id).await.unwrap().is_none());
		assert!(rentals.find_active(small.id, start).await.unwrap().is_some());

		cars.destroy(large.id).await.unwrap();
	}
}
