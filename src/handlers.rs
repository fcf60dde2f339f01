pub mod about;
pub mod dashboard;
pub mod datasets;
pub mod forecast;
pub mod health;
pub mod stores;
