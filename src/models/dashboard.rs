// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::finance::FinancialSummary;

// 1. Resumo do painel (os cards do topo).
// Contagem de transações inclui vendas pendentes e canceladas; os números
// financeiros vêm só das concluídas. Os dois filtros nunca se misturam.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub vehicles_in_stock: i64,
    pub vehicles_sold: i64,
    pub total_transactions: i64,
    pub pending_sales: i64,
    pub unread_notifications: i64,

    pub financial: FinancialSummary,
}

// 2. Gráfico de vendas (últimos 30 dias, só concluídas).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    pub date: NaiveDate,
    pub total: Decimal,
    pub count: i64,
}

// 3. Ranking de marcas mais vendidas.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopBrandEntry {
    pub brand: String,
    pub units_sold: i64,
    pub total_revenue: Decimal,
}
