// src/store/sale_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{common::error::AppError, models::sales::Sale};

#[derive(Clone)]
pub struct SaleRepository {
    sales: Arc<RwLock<Vec<Sale>>>,
}

impl SaleRepository {
    pub fn new(seed: Vec<Sale>) -> Self {
        Self {
            sales: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn list(&self) -> Vec<Sale> {
        self.sales.read().await.clone()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Sale> {
        self.sales.read().await.iter().find(|s| s.id == id).cloned()
    }

    pub async fn insert(&self, sale: Sale) -> Sale {
        let mut guard = self.sales.write().await;
        guard.push(sale.clone());
        sale
    }

    pub async fn update<F>(&self, id: Uuid, apply: F) -> Result<Sale, AppError>
    where
        F: FnOnce(&mut Sale),
    {
        let mut guard = self.sales.write().await;
        let slot = guard
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::SaleNotFound)?;
        apply(slot);
        slot.updated_at = chrono::Utc::now();
        Ok(slot.clone())
    }

    // Alguma venda registrada por este vendedor? Decide entre desativar e
    // excluir de vez um usuário.
    pub async fn any_by_seller(&self, user_id: Uuid) -> bool {
        self.sales
            .read()
            .await
            .iter()
            .any(|s| s.sold_by == Some(user_id))
    }
}
