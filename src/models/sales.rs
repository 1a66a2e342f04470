// src/models/sales.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::VehicleSummary;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Credit,
    Financing,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_id: Uuid,

    // Vendedor que registrou a venda (pode já ter sido desativado).
    pub sold_by: Option<Uuid>,

    pub selling_price: Decimal,
    pub down_payment: Option<Decimal>,
    pub payment_method: PaymentMethod,

    pub status: SaleStatus,
    pub sale_date: NaiveDate,

    // Foto do custo contábil do veículo no momento da conclusão da venda.
    // Manutenção lançada DEPOIS de concluída a venda não altera o lucro
    // histórico desta transação.
    pub cost_of_goods: Option<Decimal>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    // Lucro da venda. Só é definido para vendas concluídas, sobre o custo
    // fotografado na conclusão.
    pub fn profit(&self) -> Option<Decimal> {
        if self.status != SaleStatus::Completed {
            return None;
        }
        self.cost_of_goods.map(|cogs| self.selling_price - cogs)
    }
}

// Resposta de listagem: a venda + dados denormalizados para a tabela.
// `vehicle` fica `null` quando o vehicleId está órfão; dado ausente é
// problema de exibição, não erro.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,

    pub vehicle: Option<VehicleSummary>,
    pub customer_name: Option<String>,
    pub profit: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(status: SaleStatus, price: i64, cogs: Option<i64>) -> Sale {
        let now = Utc::now();
        Sale {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            sold_by: None,
            selling_price: Decimal::from(price),
            down_payment: None,
            payment_method: PaymentMethod::Cash,
            status,
            sale_date: now.date_naive(),
            cost_of_goods: cogs.map(Decimal::from),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn profit_only_exists_for_completed_sales() {
        assert_eq!(sale(SaleStatus::Pending, 150, Some(100)).profit(), None);
        assert_eq!(sale(SaleStatus::Cancelled, 150, Some(100)).profit(), None);
        assert_eq!(
            sale(SaleStatus::Completed, 150, Some(100)).profit(),
            Some(Decimal::from(50))
        );
    }

    #[test]
    fn profit_is_none_without_cost_snapshot() {
        assert_eq!(sale(SaleStatus::Completed, 150, None).profit(), None);
    }
}
