use super::CarService;
use crate::{
	cars::car::{Car, CarInput},
	error::CarError,
};

impl CarService {
	pub async fn create_car(&self, input: CarInput) -> Result<Car, CarError> {
		let new_car = input.into_new_car()?;
		let car = self.cars.create(new_car).await?;
		log::info!("created car {} ({})", car.id, car.name);
		Ok(car)
	}

	pub async fn update_car(&self, id: i64, input: CarInput) -> Result<Car, CarError> {
		let car = self.get_car(id).await?;
		let patch = input.into_patch()?;
		let car = self.cars.update(&car, &patch).await?;
		log::info!("updated car {}", car.id);
		Ok(car)
	}

	pub async fn delete_car(&self, id: i64) -> Result<(), CarError> {
		if self.cars.destroy(id).await? == 0 {
			return Err(CarError::NotFound { id });
		}
		log::info!("deleted car {}", id);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::{
		cars::car::Size,
		service::{
			mock::{car, MockCarModel, MockUserCarModel},
			PageSettings,
		},
	};

	fn service(cars: MockCarModel) -> CarService {
		CarService::new(Arc::new(cars), Arc::new(MockUserCarModel::default()), PageSettings::default())
	}

	fn input() -> CarInput {
		CarInput {
			name: Some("mobil test".to_string()),
			price: Some(100000),
			size: Some("large".to_string()),
			image: Some("gambar-test.png".to_string()),
			is_currently_rented: Some(false),
		}
	}

	#[tokio::test]
	async fn create_returns_the_stored_car() {
		let car = service(MockCarModel::default()).create_car(input()).await.unwrap();
		assert_eq!(car.name, "mobil test");
		assert_eq!(car.price, 100000);
		assert_eq!(car.size, Size::Large);
		assert_eq!(car.image, "gambar-test.png");
		assert!(!car.is_currently_rented);
	}

	#[tokio::test]
	async fn invalid_input_never_reaches_the_store() {
		let cars = MockCarModel::default();
		let created = cars.created.clone();
		let svc = service(cars);

		for bad in [
			CarInput { price: Some(0), ..input() },
			CarInput { price: Some(-5), ..input() },
			CarInput { size: Some("jumbo".to_string()), ..input() },
		] {
			let err = svc.create_car(bad).await.unwrap_err();
			assert!(matches!(err, CarError::Validation { .. }));
		}
		assert!(created.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn store_failure_on_create_surfaces_as_store_error() {
		let cars = MockCarModel { fail_create: true, ..Default::default() };
		let err = service(cars).create_car(input()).await.unwrap_err();
		assert!(matches!(err, CarError::Store(_)));
		assert_eq!(err.to_string(), "Something");
	}

	#[tokio::test]
	async fn update_merges_patch_into_existing_car() {
		let cars = MockCarModel { find_by_pk_result: Some(car(1)), ..Default::default() };
		let patch = CarInput {
			name: Some("mobil baru".to_string()),
			..Default::default()
		};
		let updated = service(cars).update_car(1, patch).await.unwrap();
		assert_eq!(updated.name, "mobil baru");
		assert_eq!(updated.price, 100000);
	}

	#[tokio::test]
	async fn update_unknown_car_is_not_found() {
		let cars = MockCarModel::default();
		let patches = cars.patches.clone();
		let err = service(cars).update_car(9, input()).await.unwrap_err();
		assert!(matches!(err, CarError::NotFound { id: 9 }));
		assert!(patches.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn delete_existing_car() {
		let cars = MockCarModel { destroy_result: 1, ..Default::default() };
		let destroyed = cars.destroyed.clone();
		service(cars).delete_car(1).await.unwrap();
		assert_eq!(*destroyed.lock().unwrap(), vec![1]);
	}

	#[tokio::test]
	async fn delete_unknown_car_is_not_found() {
		let err = service(MockCarModel::default()).delete_car(1).await.unwrap_err();
		assert!(matches!(err, CarError::NotFound { id: 1 }));
	}
}
