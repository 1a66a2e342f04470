// src/store/expense_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{common::error::AppError, models::finance::Expense};

#[derive(Clone)]
pub struct ExpenseRepository {
    expenses: Arc<RwLock<Vec<Expense>>>,
}

impl ExpenseRepository {
    pub fn new(seed: Vec<Expense>) -> Self {
        Self {
            expenses: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn list(&self) -> Vec<Expense> {
        self.expenses.read().await.clone()
    }

    pub async fn insert(&self, expense: Expense) -> Expense {
        let mut guard = self.expenses.write().await;
        guard.push(expense.clone());
        expense
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut guard = self.expenses.write().await;
        let before = guard.len();
        guard.retain(|e| e.id != id);
        if guard.len() == before {
            return Err(AppError::ExpenseNotFound);
        }
        Ok(())
    }
}
