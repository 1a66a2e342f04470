// src/handlers/users.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{
        PermUsersCreate, PermUsersDelete, PermUsersEdit, PermUsersView, RequirePermission,
    },
    models::{auth::User, rbac::Role},
    services::user_service::UserDeleteOutcome,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserListQuery {
    // Busca por substring em nome e e-mail, sem diferenciar caixa.
    pub search: Option<String>,
}

// ---
// Payload: CreateUser
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    pub role: Role,

    pub sales_target: Option<Decimal>,
    pub commission_rate: Option<Decimal>,
}

// ---
// Payload: UpdateUser (tudo opcional; ausência = não mexe)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    pub role: Option<Role>,
    pub is_active: Option<bool>,

    pub sales_target: Option<Decimal>,
    pub commission_rate: Option<Decimal>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDeleteResponse {
    pub outcome: UserDeleteOutcome,
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Lista de usuários", body = Vec<User>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUsersView>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list(query.search.as_deref()).await;
    Ok((StatusCode::OK, Json(users)))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 409, description = "E-mail já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUsersCreate>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .user_service
        .create(
            payload.name,
            payload.email,
            payload.password,
            payload.role,
            payload.sales_target,
            payload.commission_rate,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUsersEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .user_service
        .update(
            id,
            payload.name,
            payload.role,
            payload.is_active,
            payload.sales_target,
            payload.commission_rate,
            payload.password,
        )
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

// DELETE /api/users/{id}
// Quem já registrou venda é desativado em vez de excluído; a resposta
// diz qual dos dois aconteceu.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário excluído ou desativado", body = UserDeleteResponse),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUsersDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = app_state.user_service.delete(id).await?;
    Ok((StatusCode::OK, Json(UserDeleteResponse { outcome })))
}
