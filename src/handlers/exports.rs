// src/handlers/exports.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermReportsView, RequirePermission},
};

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xls,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportQuery {
    // csv (padrão) ou xls.
    #[serde(default)]
    pub format: ExportFormat,
}

// Geração única, sem caminho de importação de volta: o arquivo desce
// pronto com o content-type e o nome certos.
fn file_response(format: ExportFormat, base_name: &str, csv: String, xls: String) -> impl IntoResponse {
    let (content_type, extension, body) = match format {
        ExportFormat::Csv => ("text/csv; charset=utf-8", "csv", csv),
        ExportFormat::Xls => ("application/vnd.ms-excel", "xls", xls),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{base_name}.{extension}\""),
            ),
        ],
        body,
    )
}

// GET /api/exports/vehicles
#[utoipa::path(
    get,
    path = "/api/exports/vehicles",
    tag = "Exports",
    params(ExportQuery),
    responses(
        (status = 200, description = "Estoque em CSV ou XLS")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_vehicles(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsView>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let csv = app_state.export_service.vehicles_csv().await;
    let xls = app_state.export_service.vehicles_xls().await;
    Ok(file_response(query.format, "estoque", csv, xls))
}

// GET /api/exports/sales
#[utoipa::path(
    get,
    path = "/api/exports/sales",
    tag = "Exports",
    params(ExportQuery),
    responses(
        (status = 200, description = "Vendas em CSV ou XLS")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_sales(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsView>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let csv = app_state.export_service.sales_csv().await;
    let xls = app_state.export_service.sales_xls().await;
    Ok(file_response(query.format, "vendas", csv, xls))
}

// GET /api/exports/customers
#[utoipa::path(
    get,
    path = "/api/exports/customers",
    tag = "Exports",
    params(ExportQuery),
    responses(
        (status = 200, description = "Clientes em CSV ou XLS")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_customers(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermReportsView>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let csv = app_state.export_service.customers_csv().await;
    let xls = app_state.export_service.customers_xls().await;
    Ok(file_response(query.format, "clientes", csv, xls))
}
