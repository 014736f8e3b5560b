use chrono::{DateTime, Utc};

use super::CarService;
use crate::{
	cars::{
		car::{Car, Size},
		pagination::{PageRequest, Pagination},
	},
	error::CarError,
	store::CarQuery,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilter {
	pub size: Option<Size>,
	pub name: Option<String>,
	pub available_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarPage {
	pub items: Vec<Car>,
	pub total_count: i64,
	pub pagination: Pagination,
}

impl CarService {
	pub async fn list_cars(&self, filter: CarFilter, page: PageRequest) -> Result<CarPage, CarError> {
		let page = page.clamped(self.settings.max_page_size);
		let query = CarQuery {
			size: filter.size,
			name: filter.name.filter(|n| !n.is_empty()),
			available_at: filter.available_at,
			limit: Some(page.page_size),
			offset: page.offset(),
		};
		let items = self.cars.find_all(&query).await?;
		let total_count = self.cars.count(&query).await?;
		log::debug!("listed {} of {} cars (page {})", items.len(), total_count, page.page);

		Ok(CarPage {
			items,
			total_count,
			pagination: Pagination::new(page, total_count),
		})
	}

	pub async fn get_car(&self, id: i64) -> Result<Car, CarError> {
		self.cars.find_by_pk(id).await?.ok_or(CarError::NotFound { id })
	}
}
