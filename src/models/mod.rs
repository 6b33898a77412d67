pub mod equipment;
pub mod layout;
pub mod reservation;
pub mod user;

pub use equipment::*;
pub use layout::*;
pub use reservation::*;
pub use user::*;
