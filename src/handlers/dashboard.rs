// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermDashboardView, RequirePermission},
    models::dashboard::{DashboardSummary, SalesChartEntry, TopBrandEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo financeiro e operacional", body = DashboardSummary),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDashboardView>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.summary().await;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/sales-chart
#[utoipa::path(
    get,
    path = "/api/dashboard/sales-chart",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Vendas concluídas dos últimos 30 dias, por dia", body = Vec<SalesChartEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sales_chart(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDashboardView>,
) -> Result<impl IntoResponse, AppError> {
    let chart = app_state.dashboard_service.sales_chart().await;
    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/dashboard/top-brands
#[utoipa::path(
    get,
    path = "/api/dashboard/top-brands",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Ranking das marcas mais vendidas", body = Vec<TopBrandEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_top_brands(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDashboardView>,
) -> Result<impl IntoResponse, AppError> {
    let brands = app_state.dashboard_service.top_brands().await;
    Ok((StatusCode::OK, Json(brands)))
}
