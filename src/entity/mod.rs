pub mod equipment;
pub mod layout;
pub mod reservation;
pub mod user;
