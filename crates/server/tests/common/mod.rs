//! # Common Test Utilities
//!
//! Shared infrastructure for the integration tests: database setup, JWT
//! configuration and record fixtures. Tests drive the inner handlers against
//! the PostgreSQL database named by `DATABASE_URL` and skip cleanly when the
//! variable is unset.

use std::sync::Once;

use auth::{
    password::hash_password,
    secrecy::{ExposeSecret, SecretString},
    JwtConfig,
    Role,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, Set};
use server::{middleware::auth::AuthenticatedUser, AppState};
use uuid::Uuid;

/// Password used by every fixture user.
pub const TEST_PASSWORD: &str = "MotDePasse123!";

static INIT: Once = Once::new();

/// Initialize test logging (run once per test session)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::WARN)
            .try_init();
    });
}

/// Build the application state against the test database.
///
/// Returns `None` when `DATABASE_URL` is unset or unreachable, so tests can
/// skip instead of failing on machines without infrastructure.
pub async fn test_state() -> Option<AppState> {
    init_test_env();

    let database_url = std::env::var("DATABASE_URL").ok()?;
    let conn = Database::connect(&database_url).await.ok()?;
    Migrator::up(&conn, None).await.ok()?;

    Some(AppState {
        db:         conn,
        jwt_config: test_jwt_config(),
    })
}

/// JWT configuration for tests.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret:             STANDARD.encode("guichet-test-secret-at-least-32-bytes-long!!"),
        expiration_seconds: 3600,
        issuer:             "guichet-test".to_string(),
        audience:           "guichet-api-test".to_string(),
    }
}

/// Unique suffix so fixtures never collide across test runs.
pub fn unique(prefix: &str) -> String { format!("{}-{}", prefix, Uuid::new_v4().simple()) }

/// Insert a user with the given role directly into the database.
pub async fn create_user(state: &AppState, role: Role, specialite: Option<&str>) -> entity::users::Model {
    let password = SecretString::from(TEST_PASSWORD.to_string());
    let password_hash = hash_password(&password, None).expect("Failed to hash password");

    let now = Utc::now();
    let user = entity::users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        nom:           Set(unique("Nom")),
        prenom:        Set("Test".to_string()),
        email:         Set(format!("{}@test.example", unique("user"))),
        role:          Set(role),
        specialite:    Set(specialite.map(|s| s.to_string())),
        password_hash: Set(password_hash.expose_secret().to_string()),
        created_at:    Set(now),
        updated_at:    Set(now),
    };

    user.insert(&state.db).await.expect("Failed to insert test user")
}

/// Build the middleware identity for a fixture user.
pub fn identity(user: &entity::users::Model) -> AuthenticatedUser {
    AuthenticatedUser {
        id:    user.id,
        email: user.email.clone(),
        role:  user.role.clone(),
    }
}

/// Insert a client fixture.
pub async fn create_client(state: &AppState) -> entity::clients::Model {
    let client = entity::clients::ActiveModel {
        id:         Set(Uuid::new_v4()),
        nom:        Set(unique("Client")),
        telephone:  Set("0102030405".to_string()),
        email:      Set(format!("{}@client.example", unique("contact"))),
        adresse:    Set("1 rue des Tests".to_string()),
        created_at: Set(Utc::now()),
    };

    client.insert(&state.db).await.expect("Failed to insert test client")
}

/// Insert a demandeur fixture under the given client.
pub async fn create_demandeur(state: &AppState, client_id: Uuid) -> entity::demandeurs::Model {
    let demandeur = entity::demandeurs::ActiveModel {
        id:         Set(Uuid::new_v4()),
        nom:        Set(unique("Demandeur")),
        prenom:     Set("Test".to_string()),
        telephone:  Set("0607080910".to_string()),
        email:      Set(format!("{}@demandeur.example", unique("contact"))),
        fonction:   Set("Responsable informatique".to_string()),
        client_id:  Set(client_id),
        created_at: Set(Utc::now()),
    };

    demandeur
        .insert(&state.db)
        .await
        .expect("Failed to insert test demandeur")
}
