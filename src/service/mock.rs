use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::{
	cars::car::{Car, CarPatch, NewCar, Size},
	rental::user_car::{NewUserCar, UserCar},
	store::{CarModel, CarQuery, UserCarModel},
};

pub fn car(id: i64) -> Car {
	let stamp = Utc.with_ymd_and_hms(2022, 11, 17, 5, 11, 1).unwrap();
	Car {
		id,
		name: "mobil test".to_string(),
		price: 100000,
		size: Size::Large,
		image: "mobil-test.png".to_string(),
		is_currently_rented: false,
		created_at: stamp,
		updated_at: stamp,
		user_car: None,
	}
}

#[derive(Default)]
pub struct MockCarModel {
	pub find_all_result: Vec<Car>,
	pub count_result: i64,
	pub find_by_pk_result: Option<Car>,
	pub fail_find_by_pk: bool,
	pub fail_create: bool,
	pub destroy_result: u64,
	pub queries: Arc<Mutex<Vec<CarQuery>>>,
	pub created: Arc<Mutex<Vec<NewCar>>>,
	pub patches: Arc<Mutex<Vec<CarPatch>>>,
	pub destroyed: Arc<Mutex<Vec<i64>>>,
}

#[async_trait]
impl CarModel for MockCarModel {
	async fn find_all(&self, query: &CarQuery) -> anyhow::Result<Vec<Car>> {
		self.queries.lock().unwrap().push(query.clone());
		Ok(self.find_all_result.clone())
	}

	async fn count(&self, _query: &CarQuery) -> anyhow::Result<i64> {
		Ok(self.count_result)
	}

	async fn find_by_pk(&self, _id: i64) -> anyhow::Result<Option<Car>> {
		if self.fail_find_by_pk {
			anyhow::bail!("lookup failed");
		}
		Ok(self.find_by_pk_result.clone())
	}

	async fn create(&self, new_car: NewCar) -> anyhow::Result<Car> {
		self.created.lock().unwrap().push(new_car.clone());
		if self.fail_create {
			anyhow::bail!("Something");
		}
		Ok(Car {
			name: new_car.name,
			price: new_car.price,
			size: new_car.size,
			image: new_car.image,
			is_currently_rented: new_car.is_currently_rented,
			..car(1)
		})
	}

	async fn update(&self, car: &Car, patch: &CarPatch) -> anyhow::Result<Car> {
		self.patches.lock().unwrap().push(patch.clone());
		Ok(patch.apply(car))
	}

	async fn destroy(&self, id: i64) -> anyhow::Result<u64> {
		self.destroyed.lock().unwrap().push(id);
		Ok(self.destroy_result)
	}
}

#[derive(Default)]
pub struct MockUserCarModel {
	pub active: Option<UserCar>,
	pub active_checks: Arc<Mutex<Vec<(i64, DateTime<Utc>)>>>,
	pub created: Arc<Mutex<Vec<NewUserCar>>>,
}

#[async_trait]
impl UserCarModel for MockUserCarModel {
	async fn find_active(&self, car_id: i64, at: DateTime<Utc>) -> anyhow::Result<Option<UserCar>> {
		self.active_checks.lock().unwrap().push((car_id, at));
		Ok(self.active.clone())
	}

	async fn create(&self, rental: NewUserCar) -> anyhow::Result<UserCar> {
		self.created.lock().unwrap().push(rental.clone());
		Ok(UserCar {
			id: 1,
			user_id: rental.user_id,
			car_id: rental.car_id,
			rent_started_at: rental.rent_started_at,
			rent_ended_at: rental.rent_ended_at,
			created_at: rental.rent_started_at,
			updated_at: rental.rent_started_at,
		})
	}
}
