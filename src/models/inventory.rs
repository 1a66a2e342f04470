// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Situação do veículo no pátio ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Sold,
    Maintenance,
}

// --- 2. Estado de conservação ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCondition {
    Excellent,
    Good,
    Fair,
}

// --- 3. Ficha técnica ---
// Fatos imutáveis sobre o veículo físico. Nenhum campo daqui muda depois
// da entrada no estoque.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSpecs {
    #[schema(example = "Toyota")]
    pub brand: String,
    #[schema(example = "Corolla XEi")]
    pub model: String,
    pub year: i32,
    pub color: String,
    pub mileage_km: i64,
    pub engine: String,
    pub fuel: String,
    pub transmission: String,
    pub seats: i16,
    pub doors: i16,
    pub vin: String,
    pub plate: String,
}

// --- 4. Custo de manutenção ---
// Cada reparo/preparação lançado sobre o veículo entra no custo contábil.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCost {
    pub id: Uuid,
    #[schema(example = "Troca de pneus e alinhamento")]
    pub description: String,
    pub cost: Decimal,
    pub date: NaiveDate,
}

// --- 5. Veículo em estoque ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub specs: VehicleSpecs,

    pub purchase_price: Decimal,
    pub maintenance_costs: Vec<MaintenanceCost>,
    pub selling_price: Decimal,

    // Custo contábil: preço de compra + TODA manutenção registrada até o
    // momento. Recalculado a cada lançamento de manutenção ou edição de
    // preço de compra; nunca gravado por fora desse caminho.
    pub cost_basis: Decimal,

    pub status: VehicleStatus,
    pub condition: VehicleCondition,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn cost_basis_of(purchase_price: Decimal, maintenance: &[MaintenanceCost]) -> Decimal {
        purchase_price + maintenance.iter().map(|m| m.cost).sum::<Decimal>()
    }

    pub fn recompute_cost_basis(&mut self) {
        self.cost_basis = Self::cost_basis_of(self.purchase_price, &self.maintenance_costs);
    }
}

// Versão enxuta para respostas que só precisam identificar o carro
// (listagens de venda, notificações).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub status: VehicleStatus,
}

impl From<&Vehicle> for VehicleSummary {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: v.id,
            brand: v.specs.brand.clone(),
            model: v.specs.model.clone(),
            year: v.specs.year,
            plate: v.specs.plate.clone(),
            status: v.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(purchase: i64) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: Uuid::new_v4(),
            specs: VehicleSpecs {
                brand: "Fiat".into(),
                model: "Argo".into(),
                year: 2021,
                color: "Prata".into(),
                mileage_km: 42_000,
                engine: "1.3".into(),
                fuel: "Flex".into(),
                transmission: "Manual".into(),
                seats: 5,
                doors: 4,
                vin: "9BD111111MM000001".into(),
                plate: "BRA2E19".into(),
            },
            purchase_price: Decimal::from(purchase),
            maintenance_costs: vec![],
            selling_price: Decimal::from(purchase + 10_000),
            cost_basis: Decimal::from(purchase),
            status: VehicleStatus::Available,
            condition: VehicleCondition::Good,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn cost_basis_includes_every_maintenance_entry() {
        let mut v = vehicle(50_000);

        v.maintenance_costs.push(MaintenanceCost {
            id: Uuid::new_v4(),
            description: "Revisão completa".into(),
            cost: Decimal::from(1_200),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        });
        v.recompute_cost_basis();
        assert_eq!(v.cost_basis, Decimal::from(51_200));

        v.maintenance_costs.push(MaintenanceCost {
            id: Uuid::new_v4(),
            description: "Funilaria porta traseira".into(),
            cost: Decimal::from(800),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        });
        v.recompute_cost_basis();
        assert_eq!(v.cost_basis, Decimal::from(52_000));
    }

    #[test]
    fn cost_basis_follows_purchase_price_edits() {
        let mut v = vehicle(50_000);
        v.maintenance_costs.push(MaintenanceCost {
            id: Uuid::new_v4(),
            description: "Higienização".into(),
            cost: Decimal::from(300),
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        });
        v.recompute_cost_basis();

        v.purchase_price = Decimal::from(48_000);
        v.recompute_cost_basis();
        assert_eq!(v.cost_basis, Decimal::from(48_300));
    }
}
