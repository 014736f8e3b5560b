use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{error::CarError, rental::user_car::UserCar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
	Small,
	Medium,
	Large,
}

impl Size {
	pub fn as_str(&self) -> &'static str {
		match self {
			Size::Small => "small",
			Size::Medium => "medium",
			Size::Large => "large",
		}
	}
}

impl fmt::Display for Size {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Size {
	type Err = CarError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"small" => Ok(Size::Small),
			"medium" => Ok(Size::Medium),
			"large" => Ok(Size::Large),
			other => Err(CarError::validation(format!("size must be one of small, medium, large (got '{}')", other))),
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
	pub id: i64,
	pub name: String,
	pub price: i64,
	pub size: Size,
	pub image: String,
	pub is_currently_rented: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	/// Latest rental of this car, if the store joined one.
	pub user_car: Option<UserCar>,
}

/// A validated car, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
	pub name: String,
	pub price: i64,
	pub size: Size,
	pub image: String,
	pub is_currently_rented: bool,
}

/// Validated partial update. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarPatch {
	pub name: Option<String>,
	pub price: Option<i64>,
	pub size: Option<Size>,
	pub image: Option<String>,
	pub is_currently_rented: Option<bool>,
}

impl CarPatch {
	pub fn apply(&self, car: &Car) -> Car {
		let mut merged = car.clone();
		if let Some(name) = &self.name {
			merged.name = name.clone();
		}
		if let Some(price) = self.price {
			merged.price = price;
		}
		if let Some(size) = self.size {
			merged.size = size;
		}
		if let Some(image) = &self.image {
			merged.image = image.clone();
		}
		if let Some(rented) = self.is_currently_rented {
			merged.is_currently_rented = rented;
		}
		merged
	}
}

/// Request body for create and update, as sent by clients.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
	pub name: Option<String>,
	pub price: Option<i64>,
	pub size: Option<String>,
	pub image: Option<String>,
	pub is_currently_rented: Option<bool>,
}

impl CarInput {
	pub fn into_new_car(self) -> Result<NewCar, CarError> {
		let name = self.name.ok_or_else(|| CarError::validation("name is required"))?;
		let price = self.price.ok_or_else(|| CarError::validation("price is required"))?;
		let size = self.size.ok_or_else(|| CarError::validation("size is required"))?;

		Ok(NewCar {
			name: check_name(name)?,
			price: check_price(price)?,
			size: size.parse()?,
			image: self.image.unwrap_or_default(),
			is_currently_rented: self.is_currently_rented.unwrap_or(false),
		})
	}

	pub fn into_patch(self) -> Result<CarPatch, CarError> {
		Ok(CarPatch {
			name: self.name.map(check_name).transpose()?,
			price: self.price.map(check_price).transpose()?,
			size: self.size.as_deref().map(str::parse).transpose()?,
			image: self.image,
			is_currently_rented: self.is_currently_rented,
		})
	}
}

fn check_name(name: String) -> Result<String, CarError> {
	if name.trim().is_empty() {
		return Err(CarError::validation("name must not be empty"));
	}
	Ok(name)
}

fn check_price(price: i64) -> Result<i64, CarError> {
	if price <= 0 {
		return Err(CarError::validation("price must be greater than 0"));
	}
	Ok(price)
}
