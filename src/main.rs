use std::sync::Arc;

use anyhow::Context;
use car_rental_server::{
	app::{self, AppState},
	config::Config,
	db_client::db_client,
	service::CarService,
	store::{
		memory::MemoryStore,
		postgres::{PgCarModel, PgUserCarModel},
		CarModel, UserCarModel,
	},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = Config::from_env()?;

	let (cars, user_cars): (Arc<dyn CarModel>, Arc<dyn UserCarModel>) = match &config.database_url {
		Some(url) => {
			let db = db_client(url).await?;
			db.migrate().await?;
			(Arc::new(PgCarModel::new(db.clone())), Arc::new(PgUserCarModel::new(db)))
		}
		None => {
			log::warn!("DATABASE_URL not set, cars are kept in memory");
			let store = Arc::new(MemoryStore::new());
			(store.clone(), store)
		}
	};

	let state = AppState {
		service: Arc::new(CarService::new(cars, user_cars, config.page)),
	};

	let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str())
		.await
		.with_context(|| format!("failed to bind {}", config.bind_addr))?;
	log::info!("listening on {}", listener.local_addr()?);

	axum::serve(listener, app::router(state))
		.with_graceful_shutdown(shutdown_signal())
		.await?;
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		log::error!("failed to listen for shutdown signal: {}", e);
		return;
	}
	log::info!("shutting down");
}
