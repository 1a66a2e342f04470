// src/store/crm_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Customer, Vendor},
};

// Clientes e fornecedores compartilham o mesmo repositório, como o módulo
// de CRM compartilha a mesma tela.
#[derive(Clone)]
pub struct CrmRepository {
    customers: Arc<RwLock<Vec<Customer>>>,
    vendors: Arc<RwLock<Vec<Vendor>>>,
}

impl CrmRepository {
    pub fn new(customers: Vec<Customer>, vendors: Vec<Vendor>) -> Self {
        Self {
            customers: Arc::new(RwLock::new(customers)),
            vendors: Arc::new(RwLock::new(vendors)),
        }
    }

    // --- Clientes ---

    pub async fn list_customers(&self) -> Vec<Customer> {
        self.customers.read().await.clone()
    }

    pub async fn find_customer(&self, id: Uuid) -> Option<Customer> {
        self.customers
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn insert_customer(&self, customer: Customer) -> Customer {
        let mut guard = self.customers.write().await;
        guard.push(customer.clone());
        customer
    }

    pub async fn update_customer<F>(&self, id: Uuid, apply: F) -> Result<Customer, AppError>
    where
        F: FnOnce(&mut Customer),
    {
        let mut guard = self.customers.write().await;
        let slot = guard
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::CustomerNotFound)?;
        apply(slot);
        slot.updated_at = chrono::Utc::now();
        Ok(slot.clone())
    }

    pub async fn remove_customer(&self, id: Uuid) -> Result<(), AppError> {
        let mut guard = self.customers.write().await;
        let before = guard.len();
        guard.retain(|c| c.id != id);
        if guard.len() == before {
            return Err(AppError::CustomerNotFound);
        }
        Ok(())
    }

    // --- Fornecedores ---

    pub async fn list_vendors(&self) -> Vec<Vendor> {
        self.vendors.read().await.clone()
    }

    pub async fn find_vendor(&self, id: Uuid) -> Option<Vendor> {
        self.vendors
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    pub async fn insert_vendor(&self, vendor: Vendor) -> Vendor {
        let mut guard = self.vendors.write().await;
        guard.push(vendor.clone());
        vendor
    }

    pub async fn update_vendor<F>(&self, id: Uuid, apply: F) -> Result<Vendor, AppError>
    where
        F: FnOnce(&mut Vendor),
    {
        let mut guard = self.vendors.write().await;
        let slot = guard
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(AppError::VendorNotFound)?;
        apply(slot);
        slot.updated_at = chrono::Utc::now();
        Ok(slot.clone())
    }

    pub async fn remove_vendor(&self, id: Uuid) -> Result<(), AppError> {
        let mut guard = self.vendors.write().await;
        let before = guard.len();
        guard.retain(|v| v.id != id);
        if guard.len() == before {
            return Err(AppError::VendorNotFound);
        }
        Ok(())
    }
}
