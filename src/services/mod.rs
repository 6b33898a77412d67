pub mod auth;
pub mod interval;
pub mod occupancy;
pub mod reservation;

pub use auth::{AuthService, Claims};
pub use interval::Interval;
pub use reservation::ReservationService;
