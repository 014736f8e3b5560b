use std::{ops::Deref, sync::Arc};

use anyhow::Context;
use tokio_postgres::{Client, NoTls};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cars (
	id BIGSERIAL PRIMARY KEY,
	name TEXT NOT NULL,
	price BIGINT NOT NULL CHECK (price > 0),
	size TEXT NOT NULL CHECK (size IN ('small', 'medium', 'large')),
	image TEXT NOT NULL DEFAULT '',
	is_currently_rented BOOLEAN NOT NULL DEFAULT FALSE,
	created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
	updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE TABLE IF NOT EXISTS user_cars (
	id BIGSERIAL PRIMARY KEY,
	user_id BIGINT NOT NULL,
	car_id BIGINT NOT NULL,
	rent_started_at TIMESTAMPTZ NOT NULL,
	rent_ended_at TIMESTAMPTZ NOT NULL CHECK (rent_ended_at > rent_started_at),
	created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
	updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
-- Rental history outlives the car it refers to.
ALTER TABLE user_cars DROP CONSTRAINT IF EXISTS user_cars_car_id_fkey;
CREATE INDEX IF NOT EXISTS user_cars_car_id_rent_ended_at ON user_cars (car_id, rent_ended_at);
";

#[derive(Clone)]
pub struct DbClient(pub Arc<Client>);

impl Deref for DbClient {
	type Target = Client;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Opens a connection and drives it on a background task.
pub async fn db_client(database_url: &str) -> anyhow::Result<DbClient> {
	let (client, connection) = tokio_postgres::connect(database_url, NoTls)
		.await
		.context("failed to connect to postgres")?;

	tokio::spawn(async move {
		if let Err(e) = connection.await {
			log::error!("Connection error: {}", e);
		}
	});

	Ok(DbClient(Arc::new(client)))
}

impl DbClient {
	/// Creates the tables if they are missing.
	pub async fn migrate(&self) -> anyhow::Result<()> {
		self.batch_execute(SCHEMA).await.context("failed to create schema")?;
		log::info!("database schema ready");
		Ok(())
	}
}
