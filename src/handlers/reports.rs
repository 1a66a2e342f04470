// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermReportsView, RequirePermission},
    models::finance::{FinancialSummary, StockAgingBucket, VehicleProfitEntry},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodQuery {
    // Janela opcional (inclusiva nas duas pontas), formato YYYY-MM-DD.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// GET /api/reports/financial
#[utoipa::path(
    get,
    path = "/api/reports/financial",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Retrato financeiro do período", body = FinancialSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn financial_report(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsView>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .finance_service
        .period_summary(query.from, query.to)
        .await;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/reports/vehicle-profit
#[utoipa::path(
    get,
    path = "/api/reports/vehicle-profit",
    tag = "Reports",
    responses(
        (status = 200, description = "Lucro por veículo (zero sem venda concluída)", body = Vec<VehicleProfitEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn vehicle_profit_report(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsView>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.finance_service.vehicle_profit_report().await;
    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/stock-aging
#[utoipa::path(
    get,
    path = "/api/reports/stock-aging",
    tag = "Reports",
    responses(
        (status = 200, description = "Envelhecimento do estoque por faixa de dias", body = Vec<StockAgingBucket>)
    ),
    security(("api_jwt" = []))
)]
pub async fn stock_aging_report(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsView>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.finance_service.stock_aging().await;
    Ok((StatusCode::OK, Json(report)))
}
