// src/handlers/grn.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
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
    middleware::rbac::{PermGrnCreate, PermGrnView, RequirePermission},
    models::{
        grn::GoodsReceiptDetail,
        inventory::{VehicleCondition, VehicleSpecs},
    },
};

// ---
// Payload: CreateGrn
// A ficha técnica vem completa: todos os campos são fatos obrigatórios
// do veículo físico e não mudam depois da entrada.
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrnPayload {
    pub vendor_id: Uuid,

    pub specs: VehicleSpecs,

    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Decimal,

    pub condition: VehicleCondition,

    pub received_at: NaiveDate, // Formato YYYY-MM-DD
    pub notes: Option<String>,
}

// GET /api/grn
#[utoipa::path(
    get,
    path = "/api/grn",
    tag = "GRN",
    responses(
        (status = 200, description = "Notas de entrada, mais recentes primeiro", body = Vec<GoodsReceiptDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_receipts(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermGrnView>,
) -> Result<impl IntoResponse, AppError> {
    let receipts = app_state.grn_service.list().await;
    Ok((StatusCode::OK, Json(receipts)))
}

// POST /api/grn
// A entrada é o único caminho que cria veículo: nota e carro nascem
// juntos, com a numeração documental sequencial do ano.
#[utoipa::path(
    post,
    path = "/api/grn",
    tag = "GRN",
    request_body = CreateGrnPayload,
    responses(
        (status = 201, description = "Nota registrada e veículo criado", body = GoodsReceiptDetail),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_receipt(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermGrnCreate>,
    Json(payload): Json<CreateGrnPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detail = app_state
        .grn_service
        .create(
            payload.vendor_id,
            payload.specs,
            payload.purchase_price,
            payload.selling_price,
            payload.condition,
            payload.received_at,
            payload.notes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}
