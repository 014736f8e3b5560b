#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	pub page: i64,
	pub page_size: i64,
}

impl PageRequest {
	/// Missing values fall back to page 1 and `default_size`; zero or negative
	/// values are raised to 1 and the size is capped at `max_size`.
	pub fn new(page: Option<i64>, page_size: Option<i64>, default_size: i64, max_size: i64) -> Self {
		PageRequest {
			page: page.unwrap_or(1).max(1),
			page_size: page_size.unwrap_or(default_size).clamp(1, max_size.max(1)),
		}
	}

	/// Raises page and size to at least 1 and caps the size at `max_size`.
	pub fn clamped(self, max_size: i64) -> Self {
		PageRequest {
			page: self.page.max(1),
			page_size: self.page_size.clamp(1, max_size.max(1)),
		}
	}

	pub fn offset(&self) -> i64 {
		(self.page - 1).saturating_mul(self.page_size)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	pub page: i64,
	pub page_count: i64,
	pub page_size: i64,
	pub count: i64,
}

impl Pagination {
	pub fn new(request: PageRequest, count: i64) -> Self {
		let count = count.max(0);
		let page_size = request.page_size.max(1);
		Pagination {
			page: request.page,
			page_count: (count + page_size - 1) / page_size,
			page_size,
			count,
		}
	}
}
