use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{CarModel, CarQuery, UserCarModel};
use crate::{
	cars::car::{Car, CarPatch, NewCar},
	rental::user_car::{NewUserCar, UserCar},
};

#[derive(Default)]
struct Tables {
	cars: Vec<Car>,
	user_cars: Vec<UserCar>,
	next_car_id: i64,
	next_user_car_id: i64,
}

/// In-process store used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryStore {
	tables: RwLock<Tables>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Tables {
	fn latest_rental(&self, car_id: i64, ending_after: Option<DateTime<Utc>>) -> Option<UserCar> {
		self.user_cars
			.iter()
			.filter(|r| r.car_id == car_id)
			.filter(|r| ending_after.map_or(true, |at| r.rent_ended_at >= at))
			.max_by_key(|r| r.rent_ended_at)
			.cloned()
	}

	fn matching<'a>(&'a self, query: &'a CarQuery) -> impl Iterator<Item = &'a Car> + 'a {
		let needle = query.name.as_ref().map(|n| n.to_lowercase());
		self.cars.iter().filter(move |car| {
			query.size.map_or(true, |size| car.size == size)
				&& needle.as_ref().map_or(true, |n| car.name.to_lowercase().contains(n.as_str()))
		})
	}
}

#[async_trait]
impl CarModel for MemoryStore {
	async fn find_all(&self, query: &CarQuery) -> anyhow::Result<Vec<Car>> {
		let tables = self.tables.read().await;
		let offset = usize::try_from(query.offset.max(0))?;
		let limit = match query.limit {
			Some(limit) => usize::try_from(limit.max(0))?,
			None => usize::MAX,
		};
		let cars = tables
			.matching(query)
			.skip(offset)
			.take(limit)
			.map(|car| Car {
				user_car: tables.latest_rental(car.id, query.available_at),
				..car.clone()
			})
			.collect();
		Ok(cars)
	}

	async fn count(&self, query: &CarQuery) -> anyhow::Result<i64> {
		let tables = self.tables.read().await;
		Ok(i64::try_from(tables.matching(query).count())?)
	}

	async fn find_by_pk(&self, id: i64) -> anyhow::Result<Option<Car>> {
		let tables = self.tables.read().await;
		Ok(tables.cars.iter().find(|car| car.id == id).map(|car| Car {
			user_car: tables.latest_rental(id, None),
			..car.clone()
		}))
	}

	async fn create(&self, car: NewCar) -> anyhow::Result<Car> {
		let mut tables = self.tables.write().await;
		tables.next_car_id += 1;
		let now = Utc::now();
		let car = Car {
			id: tables.next_car_id,
			name: car.name,
			price: car.price,
			size: car.size,
			image: car.image,
			is_currently_rented: car.is_currently_rented,
			created_at: now,
			updated_at: now,
			user_car: None,
		};
		tables.cars.push(car.clone());
		Ok(car)
	}

	async fn update(&self, car: &Car, patch: &CarPatch) -> anyhow::Result<Car> {
		let mut tables = self.tables.write().await;
		let stored = tables
			.cars
			.iter_mut()
			.find(|c| c.id == car.id)
			.ok_or_else(|| anyhow::anyhow!("car {} disappeared during update", car.id))?;
		*stored = Car {
			updated_at: Utc::now(),
			user_car: None,
			..patch.apply(stored)
		};
		Ok(Car {
			user_car: car.user_car.clone(),
			..stored.clone()
		})
	}

	async fn destroy(&self, id: i64) -> anyhow::Result<u64> {
		let mut tables = self.tables.write().await;
		let before = tables.cars.len();
		tables.cars.retain(|car| car.id != id);
		Ok((before - tables.cars.len()) as u64)
	}
}

#[async_trait]
impl UserCarModel for MemoryStore {
	async fn find_active(&self, car_id: i64, at: DateTime<Utc>) -> anyhow::Result<Option<UserCar>> {
		let tables = self.tables.read().await;
		Ok(tables
			.user_cars
			.iter()
			.filter(|r| r.car_id == car_id && r.rent_ended_at > at)
			.max_by_key(|r| r.rent_ended_at)
			.cloned())
	}

	async fn create(&self, rental: NewUserCar) -> anyhow::Result<UserCar> {
		let mut tables = self.tables.write().await;
		tables.next_user_car_id += 1;
		let now = Utc::now();
		let rental = UserCar {
			id: tables.next_user_car_id,
			user_id: rental.user_id,
			car_id: rental.car_id,
			rent_started_at: rental.rent_started_at,
			rent_ended_at: rental.rent_ended_at,
			created_at: now,
			updated_at: now,
		};
		tables.user_cars.push(rental.clone());
		Ok(rental)
	}
}
