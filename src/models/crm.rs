// src/models/crm.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,

    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_number: Option<String>,
    pub address: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Totais do cliente DERIVADOS da coleção de vendas na leitura, nunca
// gravados no registro. O contrato observável é o mesmo dos contadores
// denormalizados: +1 compra e +preço a cada venda concluída.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,

    pub total_purchases: i64,
    pub total_spent: Decimal,
    pub last_purchase_date: Option<NaiveDate>,
}

// --- FORNECEDOR ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VendorKind {
    Individual,
    Showroom,
    Leasing,
    Auction,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: Uuid,

    pub name: String,
    pub kind: VendorKind,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    // Avaliação de 1 a 5 dada pela equipe de compras.
    pub rating: i16,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Totais derivados das notas de entrada, mesmo desenho do cliente.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorDetail {
    #[serde(flatten)]
    pub vendor: Vendor,

    pub total_transactions: i64,
    pub total_value: Decimal,
}
