// src/store/grn_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::grn::{format_document_number, GoodsReceipt};

#[derive(Clone)]
pub struct GrnRepository {
    receipts: Arc<RwLock<Vec<GoodsReceipt>>>,
}

impl GrnRepository {
    pub fn new(seed: Vec<GoodsReceipt>) -> Self {
        Self {
            receipts: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn list(&self) -> Vec<GoodsReceipt> {
        self.receipts.read().await.clone()
    }

    // Insere a nota já numerada. O número documental é sequencial por ano
    // e sai de baixo do MESMO write lock da inserção, para a sequência
    // não ter furo nem repetição.
    pub async fn insert_numbered<F>(&self, year: i32, build: F) -> GoodsReceipt
    where
        F: FnOnce(String) -> GoodsReceipt,
    {
        let mut guard = self.receipts.write().await;

        let prefix = format!("GRN-{year}-");
        let next_seq = guard
            .iter()
            .filter_map(|r| r.document_number.strip_prefix(&prefix))
            .filter_map(|seq| seq.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        let receipt = build(format_document_number(year, next_seq));
        guard.push(receipt.clone());
        receipt
    }
}
