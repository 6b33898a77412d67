// Library crate for LabReserve
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    create_equipment, create_reservation, create_user, delete_equipment, delete_layout,
    delete_reservation, delete_user, get_equipment, get_layout, get_occupancy, get_reservation,
    get_user, list_equipment, list_layout, list_reservations, list_reservations_by_equipment,
    list_reservations_by_user, list_users, login, me, save_layout, update_equipment,
    update_reservation, update_user, upsert_layout,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        // Auth routes
        .route("/api/auth/me", get(me))
        // User routes
        .route("/api/users", get(list_users))
        .route("/api/users", post(create_user))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}", put(update_user))
        .route("/api/users/{id}", delete(delete_user))
        // Equipment routes
        .route("/api/equipment", get(list_equipment))
        .route("/api/equipment", post(create_equipment))
        .route("/api/equipment/{id}", get(get_equipment))
        .route("/api/equipment/{id}", put(update_equipment))
        .route("/api/equipment/{id}", delete(delete_equipment))
        // Layout routes
        .route("/api/layout", get(list_layout))
        .route("/api/layout", post(save_layout))
        .route("/api/layout/equipment/{equipment_id}", get(get_layout))
        .route("/api/layout/equipment/{equipment_id}", put(upsert_layout))
        .route(
            "/api/layout/equipment/{equipment_id}",
            delete(delete_layout),
        )
        // Reservation routes
        .route("/api/reservations", get(list_reservations))
        .route("/api/reservations", post(create_reservation))
        .route(
            "/api/reservations/equipment/{equipment_id}",
            get(list_reservations_by_equipment),
        )
        .route(
            "/api/reservations/user/{user_id}",
            get(list_reservations_by_user),
        )
        .route("/api/reservations/{id}", get(get_reservation))
        .route("/api/reservations/{id}", put(update_reservation))
        .route("/api/reservations/{id}", delete(delete_reservation))
        // Occupancy routes
        .route("/api/occupancy/{equipment_id}", get(get_occupancy))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "LabReserve API" }))
        // Public auth routes
        .route("/api/auth/login", post(login))
        // Protected routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
