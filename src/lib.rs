pub mod app;
pub mod cars;
pub mod config;
pub mod db_client;
pub mod error;
pub mod rental;
pub mod service;
pub mod store;
pub mod users;
