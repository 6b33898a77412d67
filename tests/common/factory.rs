use time::OffsetDateTime;

use labreserve::models::{CreateEquipment, CreateReservation, CreateUser, Equipment, Reservation};
use labreserve::repositories::{EquipmentRepository, ReservationRepository, UserRepository};
use labreserve::services::AuthService;
use labreserve::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self, username: &str) -> TestAuth {
        let password = "TestPassword123!";

        let input = CreateUser {
            username: username.to_string(),
            name: Some(format!("Test User {}", username)),
            email: Some(format!("{}@example.com", username)),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        let user = UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap();

        let token =
            AuthService::generate_token(user.id, &user.username, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            username: username.to_string(),
            token,
        }
    }

    /// Create a test equipment
    pub async fn create_equipment(&self, name: &str) -> Equipment {
        let input = CreateEquipment {
            name: name.to_string(),
            equipment_type: Some("microscope".to_string()),
            description: None,
            active: true,
        };

        EquipmentRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create a reservation directly in storage
    pub async fn create_reservation(
        &self,
        user_id: i64,
        equipment_id: i64,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Reservation {
        let input = CreateReservation {
            equipment_id,
            start_time: start,
            end_time: end,
        };

        ReservationRepository::create(&self.state.db, user_id, &input)
            .await
            .unwrap()
    }
}
