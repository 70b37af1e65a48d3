pub mod clients;
pub mod dashboard;
pub mod health;
pub mod instruments;
pub mod metrics;
pub mod users;
