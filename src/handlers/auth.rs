// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::{AuthResponse, LoginPayload, User},
        rbac::ModulePermissions,
    },
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão estabelecida", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas ou conta desativada")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(response))
}

// POST /api/auth/logout
// O token vive no cliente; encerrar sessão é descartá-lo. O endpoint
// existe para o fluxo ser explícito e é idempotente por construção.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Sessão encerrada")
    )
)]
pub async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Dados do usuário autenticado", body = User),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

// GET /api/auth/permissions
// A matriz do papel do usuário logado, para o frontend esconder botões.
#[utoipa::path(
    get,
    path = "/api/auth/permissions",
    tag = "Auth",
    responses(
        (status = 200, description = "Matriz de permissões do papel", body = Vec<ModulePermissions>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_permissions(
    AuthenticatedUser(user): AuthenticatedUser,
) -> Json<Vec<ModulePermissions>> {
    Json(user.role.permission_table())
}
