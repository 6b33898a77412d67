use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use labreserve::config::Config;
use labreserve::handlers::{
    AuthResponse, BulkLayoutItem, CreateEquipmentRequest, CreateReservationRequest,
    CreateUserRequest, EquipmentResponse, LayoutResponse, LoginRequest, OccupancyResponse,
    OccupancySlot, UpdateEquipmentRequest, UpdateReservationRequest, UpdateUserRequest,
    UpsertLayoutRequest,
};
use labreserve::models::{ReservationDetail, UserResponse};
use labreserve::state::AppState;
use labreserve::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::me,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::create_user,
        handlers::user::update_user,
        handlers::user::delete_user,
        handlers::equipment::list_equipment,
        handlers::equipment::get_equipment,
        handlers::equipment::create_equipment,
        handlers::equipment::update_equipment,
        handlers::equipment::delete_equipment,
        handlers::layout::list_layout,
        handlers::layout::get_layout,
        handlers::layout::save_layout,
        handlers::layout::upsert_layout,
        handlers::layout::delete_layout,
        handlers::reservation::list_reservations,
        handlers::reservation::get_reservation,
        handlers::reservation::list_reservations_by_equipment,
        handlers::reservation::list_reservations_by_user,
        handlers::reservation::create_reservation,
        handlers::reservation::update_reservation,
        handlers::reservation::delete_reservation,
        handlers::occupancy::get_occupancy,
    ),
    components(schemas(
        LoginRequest,
        AuthResponse,
        UserResponse,
        CreateUserRequest,
        UpdateUserRequest,
        CreateEquipmentRequest,
        UpdateEquipmentRequest,
        EquipmentResponse,
        UpsertLayoutRequest,
        BulkLayoutItem,
        LayoutResponse,
        CreateReservationRequest,
        UpdateReservationRequest,
        ReservationDetail,
        OccupancyResponse,
        OccupancySlot,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "User management endpoints"),
        (name = "Equipment", description = "Equipment management endpoints"),
        (name = "Layout", description = "Floor-plan layout endpoints"),
        (name = "Reservations", description = "Reservation booking endpoints"),
        (name = "Occupancy", description = "Occupancy grid endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to the database and migrates)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database ready");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.unwrap();
}
