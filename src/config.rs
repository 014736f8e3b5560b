use std::env;

use anyhow::{bail, Context};

use crate::service::PageSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	pub bind_addr: String,
	/// Postgres connection string. Without one the server keeps cars in memory.
	pub database_url: Option<String>,
	pub page: PageSettings,
}

impl Config {
	pub fn from_env() -> anyhow::Result<Self> {
		dotenvy::dotenv().ok();
		Self::from_lookup(|key| env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
		let defaults = PageSettings::default();
		let default_page_size = parse_or(&lookup, "DEFAULT_PAGE_SIZE", defaults.default_page_size)?;
		let max_page_size = parse_or(&lookup, "MAX_PAGE_SIZE", defaults.max_page_size)?;
		if default_page_size < 1 || default_page_size > max_page_size {
			bail!("DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE ({})", max_page_size);
		}

		Ok(Config {
			bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:4000".to_string()),
			database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
			page: PageSettings {
				default_page_size,
				max_page_size,
			},
		})
	}
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: i64) -> anyhow::Result<i64> {
	match lookup(key) {
		Some(raw) => raw.trim().parse().with_context(|| format!("{} must be an integer, got '{}'", key, raw)),
		None => Ok(default),
	}
}
