// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Despesa operacional avulsa (aluguel do pátio, documentação, marketing).
// Entra negativa no lucro líquido.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,

    pub description: String,
    #[schema(example = "Documentação")]
    pub category: String,
    pub amount: Decimal,
    pub expense_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

// O retrato financeiro consistente usado por dashboard, vendas e
// relatórios: receita, custo e lucro derivados das três coleções.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_revenue: Decimal,
    pub total_cost_of_sales: Decimal,
    pub gross_profit: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
}

// Linha da tabela de lucro por veículo.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProfitEntry {
    pub vehicle_id: Uuid,
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub selling_price: Decimal,
    pub cost_basis: Decimal,

    // Zero quando não existe venda concluída para o veículo: a tabela
    // agregada nunca mostra lucro de venda pendente ou cancelada.
    pub profit: Decimal,
}

// Faixa de envelhecimento do estoque (dias em pátio).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockAgingBucket {
    #[schema(example = "31-60")]
    pub label: String,
    pub count: i64,
    pub total_cost: Decimal,
}
