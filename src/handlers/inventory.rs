// src/handlers/inventory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{
        PermInventoryDelete, PermInventoryEdit, PermInventoryView, RequirePermission,
    },
    models::inventory::{Vehicle, VehicleCondition, VehicleStatus},
};

// ---
// Validação Customizada
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VehicleListQuery {
    // Busca por substring em marca, modelo, placa e chassi.
    pub search: Option<String>,
    pub status: Option<VehicleStatus>,
}

// ---
// Payload: UpdateVehicle (só os campos comerciais; a ficha técnica é
// imutável depois da entrada)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehiclePayload {
    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Option<Decimal>,

    pub status: Option<VehicleStatus>,
    pub condition: Option<VehicleCondition>,
}

// ---
// Payload: AddMaintenance
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMaintenancePayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub cost: Decimal,

    pub date: NaiveDate, // Formato YYYY-MM-DD
}

// GET /api/inventory/vehicles
#[utoipa::path(
    get,
    path = "/api/inventory/vehicles",
    tag = "Inventory",
    params(VehicleListQuery),
    responses(
        (status = 200, description = "Veículos em estoque", body = Vec<Vehicle>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_vehicles(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryView>,
    Query(query): Query<VehicleListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let vehicles = app_state
        .inventory_service
        .list(query.search.as_deref(), query.status)
        .await;
    Ok((StatusCode::OK, Json(vehicles)))
}

// GET /api/inventory/vehicles/{id}
#[utoipa::path(
    get,
    path = "/api/inventory/vehicles/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Ficha completa do veículo", body = Vehicle),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle = app_state.inventory_service.get(id).await?;
    Ok((StatusCode::OK, Json(vehicle)))
}

// PUT /api/inventory/vehicles/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/vehicles/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    request_body = UpdateVehiclePayload,
    responses(
        (status = 200, description = "Veículo atualizado (custo contábil recalculado)", body = Vehicle),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_vehicle(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let vehicle = app_state
        .inventory_service
        .update_commercial(
            id,
            payload.purchase_price,
            payload.selling_price,
            payload.status,
            payload.condition,
        )
        .await?;

    Ok((StatusCode::OK, Json(vehicle)))
}

// POST /api/inventory/vehicles/{id}/maintenance
#[utoipa::path(
    post,
    path = "/api/inventory/vehicles/{id}/maintenance",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    request_body = AddMaintenancePayload,
    responses(
        (status = 200, description = "Custo lançado e custo contábil recalculado", body = Vehicle),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_maintenance(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddMaintenancePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let vehicle = app_state
        .inventory_service
        .add_maintenance(id, payload.description, payload.cost, payload.date)
        .await?;

    Ok((StatusCode::OK, Json(vehicle)))
}

// DELETE /api/inventory/vehicles/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/vehicles/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 204, description = "Veículo removido"),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_vehicle(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInventoryDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
