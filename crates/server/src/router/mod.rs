//! # API Router Configuration
//!
//! Configures API routes for the Guichet application. Wrapper handlers bind
//! the axum extractors and delegate to the inner handlers, which take the
//! application state and the authenticated identity as plain parameters.

use axum::{
    extract::{Extension, Path, Query, State as AxumState},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json,
    Router,
};
use error::Result;
use uuid::Uuid;

use crate::{
    dto::{
        auth::{InitialAdminRequest, LoginRequest, LoginResponse},
        clients::{ClientResponse, CreateClientRequest, UpdateClientRequest},
        demandeurs::{CreateDemandeurRequest, DemandeurDetailResponse, DemandeurResponse, UpdateDemandeurRequest},
        stats::{AdminStatisticsResponse, AssistantStatisticsResponse, StatsPeriodQuery},
        tickets::{
            AddCommentRequest,
            AssignRequest,
            CreateTicketRequest,
            SetStatusRequest,
            TicketDetail,
            TicketSummary,
        },
        users::{
            ChangePasswordRequest,
            CollaborateurResponse,
            CreateUserRequest,
            UpdateMyProfileRequest,
            UserResponse,
        },
        SuccessResponse,
    },
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .route("/api/v1/users/me", get(get_my_profile).put(update_my_profile))
        .route("/api/v1/users/me/password", put(change_password))
        .route("/api/v1/admin/users", get(list_users).post(create_user))
        .route("/api/v1/admin/users/:id", delete(delete_user))
        .route("/api/v1/admin/statistics", get(admin_statistics))
        .route("/api/v1/assistant/statistics", get(assistant_statistics))
        .route("/api/v1/collaborateurs", get(list_collaborateurs))
        .route("/api/v1/clients", get(list_clients).post(create_client))
        .route(
            "/api/v1/clients/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/api/v1/clients/:id/demandeurs", get(client_demandeurs))
        .route("/api/v1/demandeurs", get(list_demandeurs).post(create_demandeur))
        .route(
            "/api/v1/demandeurs/:id",
            get(get_demandeur).put(update_demandeur).delete(delete_demandeur),
        )
        .route("/api/v1/tickets", get(list_tickets).post(create_ticket))
        .route("/api/v1/tickets/recent", get(recent_tickets))
        .route("/api/v1/tickets/:id", get(get_ticket))
        .route("/api/v1/tickets/:id/status", put(set_ticket_status))
        .route("/api/v1/tickets/:id/assign", put(assign_ticket))
        .route("/api/v1/tickets/:id/comments", post(add_ticket_comment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    // Public routes that don't require authentication
    let public_routes = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/setup/initial-admin", post(initial_admin));

    public_routes.merge(protected_routes).with_state(state)
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
}

// ==================== Session ====================

async fn login(AxumState(state): AxumState<AppState>, Json(req): Json<LoginRequest>) -> Result<Json<LoginResponse>> {
    crate::session::login_handler_inner(&state, req).await
}

async fn initial_admin(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<InitialAdminRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    crate::session::initial_admin_handler_inner(&state, req).await
}

// ==================== Users ====================

async fn get_my_profile(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>> {
    crate::users::get_my_profile_handler(&state, user).await
}

async fn update_my_profile(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateMyProfileRequest>,
) -> Result<Json<UserResponse>> {
    crate::users::update_my_profile_handler(&state, user, req).await
}

async fn change_password(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<SuccessResponse>> {
    crate::users::change_password_handler(&state, user, req).await
}

async fn list_users(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<UserResponse>>> {
    crate::users::list_users_handler(&state, user).await
}

async fn create_user(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    crate::users::create_user_handler(&state, user, req).await
}

async fn delete_user(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    crate::users::delete_user_handler(&state, user, user_id).await
}

async fn list_collaborateurs(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<CollaborateurResponse>>> {
    crate::users::list_collaborateurs_handler(&state, user).await
}

// ==================== Statistics ====================

async fn admin_statistics(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<StatsPeriodQuery>,
) -> Result<Json<AdminStatisticsResponse>> {
    crate::stats::admin_statistics_handler(&state, user, query).await
}

async fn assistant_statistics(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<AssistantStatisticsResponse>> {
    crate::stats::assistant_statistics_handler(&state, user).await
}

// ==================== Clients ====================

async fn list_clients(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<ClientResponse>>> {
    crate::clients::list_clients_handler(&state, user).await
}

async fn get_client(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<ClientResponse>> {
    crate::clients::get_client_handler(&state, user, client_id).await
}

async fn create_client(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>)> {
    crate::clients::create_client_handler(&state, user, req).await
}

async fn update_client(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<Json<ClientResponse>> {
    crate::clients::update_client_handler(&state, user, client_id, req).await
}

async fn delete_client(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    crate::clients::delete_client_handler(&state, user, client_id).await
}

async fn client_demandeurs(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<DemandeurResponse>>> {
    crate::clients::client_demandeurs_handler(&state, user, client_id).await
}

// ==================== Demandeurs ====================

async fn list_demandeurs(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<DemandeurResponse>>> {
    crate::demandeurs::list_demandeurs_handler(&state, user).await
}

async fn get_demandeur(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(demandeur_id): Path<Uuid>,
) -> Result<Json<DemandeurDetailResponse>> {
    crate::demandeurs::get_demandeur_handler(&state, user, demandeur_id).await
}

async fn create_demandeur(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateDemandeurRequest>,
) -> Result<(StatusCode, Json<DemandeurResponse>)> {
    crate::demandeurs::create_demandeur_handler(&state, user, req).await
}

async fn update_demandeur(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(demandeur_id): Path<Uuid>,
    Json(req): Json<UpdateDemandeurRequest>,
) -> Result<Json<DemandeurResponse>> {
    crate::demandeurs::update_demandeur_handler(&state, user, demandeur_id, req).await
}

async fn delete_demandeur(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(demandeur_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    crate::demandeurs::delete_demandeur_handler(&state, user, demandeur_id).await
}

// ==================== Tickets ====================

async fn list_tickets(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<TicketSummary>>> {
    crate::tickets::list_tickets_handler(&state, user).await
}

async fn recent_tickets(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<TicketSummary>>> {
    crate::tickets::recent_tickets_handler(&state, user).await
}

async fn get_ticket(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(ticket_id): Path<Uuid>,
) -> Result<Json<TicketDetail>> {
    crate::tickets::get_ticket_handler(&state, user, ticket_id).await
}

async fn create_ticket(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketSummary>)> {
    crate::tickets::create_ticket_handler(&state, user, req).await
}

async fn set_ticket_status(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<TicketSummary>> {
    crate::tickets::set_status_handler(&state, user, ticket_id, req).await
}

async fn assign_ticket(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<TicketDetail>> {
    crate::tickets::assign_handler(&state, user, ticket_id, req).await
}

async fn add_ticket_comment(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> Result<Json<TicketDetail>> {
    crate::tickets::add_comment_handler(&state, user, ticket_id, req).await
}
