// src/store/vehicle_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{common::error::AppError, models::inventory::Vehicle};

// Repositório de veículos. A coleção inteira vive em memória e volta ao
// conjunto inicial a cada reinício: o sistema não tem camada de
// persistência.
#[derive(Clone)]
pub struct VehicleRepository {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
}

impl VehicleRepository {
    pub fn new(seed: Vec<Vehicle>) -> Self {
        Self {
            vehicles: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn list(&self) -> Vec<Vehicle> {
        self.vehicles.read().await.clone()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Vehicle> {
        self.vehicles
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    pub async fn insert(&self, vehicle: Vehicle) -> Vehicle {
        let mut guard = self.vehicles.write().await;
        guard.push(vehicle.clone());
        vehicle
    }

    // Atualização por substituição integral do registro, sob o write lock.
    pub async fn update<F>(&self, id: Uuid, apply: F) -> Result<Vehicle, AppError>
    where
        F: FnOnce(&mut Vehicle),
    {
        let mut guard = self.vehicles.write().await;
        let slot = guard
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(AppError::VehicleNotFound)?;
        apply(slot);
        slot.updated_at = chrono::Utc::now();
        Ok(slot.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut guard = self.vehicles.write().await;
        let before = guard.len();
        guard.retain(|v| v.id != id);
        if guard.len() == before {
            return Err(AppError::VehicleNotFound);
        }
        Ok(())
    }
}
