// src/models/grn.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Nota de entrada (GRN): o registro criado quando um veículo é comprado e
// entra no estoque. Imutável depois de criada: não existe fluxo de edição.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceipt {
    pub id: Uuid,

    // Numeração documental sequencial por ano: "GRN-2025-0001".
    #[schema(example = "GRN-2025-0001")]
    pub document_number: String,

    pub vehicle_id: Uuid,
    pub vendor_id: Uuid,

    pub purchase_price: Decimal,
    pub received_at: NaiveDate,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

pub fn format_document_number(year: i32, seq: u32) -> String {
    format!("GRN-{year}-{seq:04}")
}

// Resposta de listagem: a nota + o resumo do veículo e o nome do
// fornecedor, quando ainda existirem.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceiptDetail {
    #[serde(flatten)]
    pub receipt: GoodsReceipt,

    pub vehicle: Option<crate::models::inventory::VehicleSummary>,
    pub vendor_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_number_is_zero_padded_per_year() {
        assert_eq!(format_document_number(2025, 1), "GRN-2025-0001");
        assert_eq!(format_document_number(2025, 42), "GRN-2025-0042");
        assert_eq!(format_document_number(2026, 1234), "GRN-2026-1234");
    }
}
