// src/handlers/finance.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::inventory::validate_not_negative,
    middleware::rbac::{
        PermReportsCreate, PermReportsDelete, PermReportsView, RequirePermission,
    },
    models::finance::Expense,
};

// ---
// Payload: CreateExpense
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,

    pub expense_date: NaiveDate, // Formato YYYY-MM-DD
}

// GET /api/finance/expenses
#[utoipa::path(
    get,
    path = "/api/finance/expenses",
    tag = "Finance",
    responses(
        (status = 200, description = "Despesas operacionais, mais recentes primeiro", body = Vec<Expense>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsView>,
) -> Result<impl IntoResponse, AppError> {
    let expenses = app_state.finance_service.list_expenses().await;
    Ok((StatusCode::OK, Json(expenses)))
}

// POST /api/finance/expenses
#[utoipa::path(
    post,
    path = "/api/finance/expenses",
    tag = "Finance",
    request_body = CreateExpensePayload,
    responses(
        (status = 201, description = "Despesa registrada", body = Expense)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsCreate>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let expense = app_state
        .finance_service
        .create_expense(
            payload.description,
            payload.category,
            payload.amount,
            payload.expense_date,
        )
        .await;

    Ok((StatusCode::CREATED, Json(expense)))
}

// DELETE /api/finance/expenses/{id}
#[utoipa::path(
    delete,
    path = "/api/finance/expenses/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID da despesa")),
    responses(
        (status = 204, description = "Despesa removida"),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.finance_service.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
