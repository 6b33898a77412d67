pub mod auth;
pub mod equipment;
pub mod layout;
pub mod occupancy;
pub mod reservation;
pub mod user;

pub use auth::{login, me, AuthResponse, LoginRequest};
pub use equipment::{
    create_equipment, delete_equipment, get_equipment, list_equipment, update_equipment,
    CreateEquipmentRequest, EquipmentResponse, UpdateEquipmentRequest,
};
pub use layout::{
    delete_layout, get_layout, list_layout, save_layout, upsert_layout, BulkLayoutItem,
    LayoutResponse, UpsertLayoutRequest,
};
pub use occupancy::{get_occupancy, OccupancyResponse, OccupancySlot};
pub use reservation::{
    create_reservation, delete_reservation, get_reservation, list_reservations,
    list_reservations_by_equipment, list_reservations_by_user, update_reservation,
    CreateReservationRequest, UpdateReservationRequest,
};
pub use user::{
    create_user, delete_user, get_user, list_users, update_user, CreateUserRequest,
    UpdateUserRequest,
};
