pub mod client;
pub mod clinical;
pub mod progress;
pub mod roster;
pub mod user;
