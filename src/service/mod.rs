//! Car listing, car maintenance and renting, on top of the store traits.

mod read;
mod rental;
mod write;

#[cfg(test)]
mod mock;

use std::sync::Arc;

pub use read::{CarFilter, CarPage};

use crate::store::{CarModel, UserCarModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
	pub default_page_size: i64,
	pub max_page_size: i64,
}

impl Default for PageSettings {
	fn default() -> Self {
		PageSettings {
			default_page_size: 10,
			max_page_size: 100,
		}
	}
}

pub struct CarService {
	cars: Arc<dyn CarModel>,
	user_cars: Arc<dyn UserCarModel>,
	settings: PageSettings,
}

impl CarService {
	pub fn new(cars: Arc<dyn CarModel>, user_cars: Arc<dyn UserCarModel>, settings: PageSettings) -> Self {
		CarService { cars, user_cars, settings }
	}

	pub fn page_settings(&self) -> PageSettings {
		self.settings
	}
}
