// src/services/inventory_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{MaintenanceCost, Vehicle, VehicleCondition, VehicleStatus},
    store::VehicleRepository,
};

#[derive(Clone)]
pub struct InventoryService {
    vehicle_repo: VehicleRepository,
}

impl InventoryService {
    pub fn new(vehicle_repo: VehicleRepository) -> Self {
        Self { vehicle_repo }
    }

    // Busca por substring (sem caixa) em marca, modelo, placa e chassi,
    // mais o filtro de status (o mesmo recorte da tela de estoque).
    pub async fn list(
        &self,
        search: Option<&str>,
        status: Option<VehicleStatus>,
    ) -> Vec<Vehicle> {
        let mut vehicles = self.vehicle_repo.list().await;

        if let Some(status) = status {
            vehicles.retain(|v| v.status == status);
        }

        if let Some(term) = search {
            let term = term.to_lowercase();
            vehicles.retain(|v| {
                v.specs.brand.to_lowercase().contains(&term)
                    || v.specs.model.to_lowercase().contains(&term)
                    || v.specs.plate.to_lowercase().contains(&term)
                    || v.specs.vin.to_lowercase().contains(&term)
            });
        }

        vehicles
    }

    pub async fn get(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.vehicle_repo
            .find_by_id(id)
            .await
            .ok_or(AppError::VehicleNotFound)
    }

    // Edição comercial. Qualquer mexida no preço de compra recalcula o
    // custo contábil na mesma atualização: o invariante nunca fica
    // aberto entre duas escritas.
    pub async fn update_commercial(
        &self,
        id: Uuid,
        purchase_price: Option<Decimal>,
        selling_price: Option<Decimal>,
        status: Option<VehicleStatus>,
        condition: Option<VehicleCondition>,
    ) -> Result<Vehicle, AppError> {
        self.vehicle_repo
            .update(id, |v| {
                if let Some(price) = purchase_price {
                    v.purchase_price = price;
                }
                if let Some(price) = selling_price {
                    v.selling_price = price;
                }
                if let Some(status) = status {
                    v.status = status;
                }
                if let Some(condition) = condition {
                    v.condition = condition;
                }
                v.recompute_cost_basis();
            })
            .await
    }

    pub async fn add_maintenance(
        &self,
        id: Uuid,
        description: String,
        cost: Decimal,
        date: NaiveDate,
    ) -> Result<Vehicle, AppError> {
        self.vehicle_repo
            .update(id, |v| {
                v.maintenance_costs.push(MaintenanceCost {
                    id: Uuid::new_v4(),
                    description,
                    cost,
                    date,
                });
                v.recompute_cost_basis();
            })
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.vehicle_repo.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::VehicleSpecs;
    use chrono::Utc;

    fn vehicle(brand: &str, plate: &str, status: VehicleStatus, purchase: i64) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: Uuid::new_v4(),
            specs: VehicleSpecs {
                brand: brand.into(),
                model: "Modelo".into(),
                year: 2020,
                color: "Prata".into(),
                mileage_km: 50_000,
                engine: "1.0".into(),
                fuel: "Flex".into(),
                transmission: "Manual".into(),
                seats: 5,
                doors: 4,
                vin: "9BR0000000T000001".into(),
                plate: plate.into(),
            },
            purchase_price: Decimal::from(purchase),
            maintenance_costs: vec![],
            selling_price: Decimal::from(purchase + 10_000),
            cost_basis: Decimal::from(purchase),
            status,
            condition: VehicleCondition::Good,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn maintenance_insertion_updates_the_cost_basis() {
        let v = vehicle("Fiat", "AAA0A00", VehicleStatus::Available, 50_000);
        let id = v.id;
        let service = InventoryService::new(VehicleRepository::new(vec![v]));

        let updated = service
            .add_maintenance(
                id,
                "Troca de embreagem".into(),
                Decimal::from(2_000),
                Utc::now().date_naive(),
            )
            .await
            .unwrap();

        assert_eq!(updated.cost_basis, Decimal::from(52_000));
        assert_eq!(updated.maintenance_costs.len(), 1);
    }

    #[tokio::test]
    async fn purchase_price_edit_recomputes_the_cost_basis() {
        let v = vehicle("Fiat", "AAA0A00", VehicleStatus::Available, 50_000);
        let id = v.id;
        let service = InventoryService::new(VehicleRepository::new(vec![v]));

        service
            .add_maintenance(id, "Pintura".into(), Decimal::from(1_500), Utc::now().date_naive())
            .await
            .unwrap();

        let updated = service
            .update_commercial(id, Some(Decimal::from(48_000)), None, None, None)
            .await
            .unwrap();

        assert_eq!(updated.cost_basis, Decimal::from(49_500));
    }

    #[tokio::test]
    async fn list_filters_by_search_term_and_status() {
        let service = InventoryService::new(VehicleRepository::new(vec![
            vehicle("Toyota", "AAA1A11", VehicleStatus::Available, 90_000),
            vehicle("Honda", "BBB2B22", VehicleStatus::Sold, 80_000),
            vehicle("Hyundai", "CCC3C33", VehicleStatus::Available, 60_000),
        ]));

        let available = service.list(None, Some(VehicleStatus::Available)).await;
        assert_eq!(available.len(), 2);

        // Busca sem caixa: "toyo" encontra "Toyota".
        let toyotas = service.list(Some("toyo"), None).await;
        assert_eq!(toyotas.len(), 1);
        assert_eq!(toyotas[0].specs.brand, "Toyota");

        let by_plate = service.list(Some("bbb2"), None).await;
        assert_eq!(by_plate.len(), 1);
        assert_eq!(by_plate[0].specs.brand, "Honda");
    }
}
