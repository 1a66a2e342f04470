// src/handlers/notifications.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, models::notification::NotificationDetail,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct NotificationListQuery {
    // true = só as não lidas.
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub marked: usize,
}

// O sino de notificações faz parte do chrome do painel: qualquer usuário
// autenticado enxerga e marca as próprias notificações, sem permissão de
// módulo.

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "Notificações com o destino já resolvido", body = Vec<NotificationDetail>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let notifications = app_state.notification_service.list(query.unread).await;
    Ok((StatusCode::OK, Json(notifications)))
}

// POST /api/notifications/{id}/read
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Notificação marcada como lida", body = NotificationDetail),
        (status = 404, description = "Notificação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let notification = app_state.notification_service.mark_read(id).await?;
    Ok((StatusCode::OK, Json(notification)))
}

// POST /api/notifications/read-all
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    responses(
        (status = 200, description = "Todas marcadas como lidas", body = MarkAllReadResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_all_read(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let marked = app_state.notification_service.mark_all_read().await;
    Ok((StatusCode::OK, Json(MarkAllReadResponse { marked })))
}
