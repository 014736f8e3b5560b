use chrono::{DateTime, Duration, Utc};

use super::CarService;
use crate::{
	error::CarError,
	rental::user_car::{NewUserCar, UserCar},
};

impl CarService {
	/// Rents `car_id` to `user_id` from `rent_started_at`, for one day unless
	/// `rent_ended_at` is given.
	///
	/// Lookup failures are returned untouched so the caller's error handler
	/// decides the response.
	pub async fn rent_car(
		&self,
		car_id: i64,
		user_id: i64,
		rent_started_at: DateTime<Utc>,
		rent_ended_at: Option<DateTime<Utc>>,
	) -> Result<UserCar, CarError> {
		let car = self.get_car(car_id).await?;

		let rent_ended_at = rent_ended_at.unwrap_or(rent_started_at + Duration::days(1));
		if rent_ended_at <= rent_started_at {
			return Err(CarError::validation("rentEndedAt must be after rentStartedAt"));
		}

		if let Some(active) = self.user_cars.find_active(car.id, rent_started_at).await? {
			log::debug!("car {} has rental {} until {}", car.id, active.id, active.rent_ended_at);
			return Err(CarError::AlreadyRented { car: Box::new(car) });
		}

		let rental = self
			.user_cars
			.create(NewUserCar {
				user_id,
				car_id: car.id,
				rent_started_at,
				rent_ended_at,
			})
			.await?;
		log::info!("user {} rented car {} until {}", user_id, car.id, rental.rent_ended_at);
		Ok(rental)
	}
}
