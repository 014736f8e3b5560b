pub mod rental;
pub mod user_car;
