// src/services/crm_service.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        crm::{Customer, CustomerDetail, Vendor, VendorDetail, VendorKind},
        grn::GoodsReceipt,
        sales::{Sale, SaleStatus},
    },
    store::{CrmRepository, GrnRepository, SaleRepository},
};

// Totais do cliente derivados da coleção de vendas: só as concluídas
// contam. O registro do cliente nunca guarda contador; o que a tela vê
// é sempre recalculado daqui.
fn customer_totals(customer_id: Uuid, sales: &[Sale]) -> (i64, Decimal, Option<NaiveDate>) {
    let mut total_purchases = 0;
    let mut total_spent = Decimal::ZERO;
    let mut last_purchase_date = None;

    for sale in sales
        .iter()
        .filter(|s| s.customer_id == customer_id && s.status == SaleStatus::Completed)
    {
        total_purchases += 1;
        total_spent += sale.selling_price;
        if last_purchase_date.is_none_or(|d| sale.sale_date > d) {
            last_purchase_date = Some(sale.sale_date);
        }
    }

    (total_purchases, total_spent, last_purchase_date)
}

// Totais do fornecedor derivados das notas de entrada. Toda nota conta:
// entrada registrada é compra feita.
fn vendor_totals(vendor_id: Uuid, receipts: &[GoodsReceipt]) -> (i64, Decimal) {
    let mut total_transactions = 0;
    let mut total_value = Decimal::ZERO;
    for receipt in receipts.iter().filter(|r| r.vendor_id == vendor_id) {
        total_transactions += 1;
        total_value += receipt.purchase_price;
    }
    (total_transactions, total_value)
}

#[derive(Clone)]
pub struct CrmService {
    crm_repo: CrmRepository,
    sale_repo: SaleRepository,
    grn_repo: GrnRepository,
}

impl CrmService {
    pub fn new(crm_repo: CrmRepository, sale_repo: SaleRepository, grn_repo: GrnRepository) -> Self {
        Self {
            crm_repo,
            sale_repo,
            grn_repo,
        }
    }

    // --- Clientes ---

    pub async fn list_customers(&self, search: Option<&str>) -> Vec<CustomerDetail> {
        let mut customers = self.crm_repo.list_customers().await;

        if let Some(term) = search {
            let term = term.to_lowercase();
            customers.retain(|c| {
                c.full_name.to_lowercase().contains(&term)
                    || c.email.as_ref().is_some_and(|e| e.to_lowercase().contains(&term))
                    || c.phone.as_ref().is_some_and(|p| p.contains(&term))
            });
        }

        let sales = self.sale_repo.list().await;
        customers
            .into_iter()
            .map(|customer| {
                let (total_purchases, total_spent, last_purchase_date) =
                    customer_totals(customer.id, &sales);
                CustomerDetail {
                    customer,
                    total_purchases,
                    total_spent,
                    last_purchase_date,
                }
            })
            .collect()
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<CustomerDetail, AppError> {
        let customer = self
            .crm_repo
            .find_customer(id)
            .await
            .ok_or(AppError::CustomerNotFound)?;
        let sales = self.sale_repo.list().await;
        let (total_purchases, total_spent, last_purchase_date) = customer_totals(id, &sales);
        Ok(CustomerDetail {
            customer,
            total_purchases,
            total_spent,
            last_purchase_date,
        })
    }

    pub async fn create_customer(
        &self,
        full_name: String,
        email: Option<String>,
        phone: Option<String>,
        document_number: Option<String>,
        address: Option<String>,
    ) -> Customer {
        let now = Utc::now();
        self.crm_repo
            .insert_customer(Customer {
                id: Uuid::new_v4(),
                full_name,
                email,
                phone,
                document_number,
                address,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    pub async fn update_customer(
        &self,
        id: Uuid,
        full_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        document_number: Option<String>,
        address: Option<String>,
    ) -> Result<Customer, AppError> {
        self.crm_repo
            .update_customer(id, |c| {
                if let Some(name) = full_name {
                    c.full_name = name;
                }
                if email.is_some() {
                    c.email = email;
                }
                if phone.is_some() {
                    c.phone = phone;
                }
                if document_number.is_some() {
                    c.document_number = document_number;
                }
                if address.is_some() {
                    c.address = address;
                }
            })
            .await
    }

    // Excluir cliente não apaga as vendas dele: a listagem de vendas passa
    // a exibir o cliente como ausente, que é problema de exibição.
    pub async fn delete_customer(&self, id: Uuid) -> Result<(), AppError> {
        self.crm_repo.remove_customer(id).await
    }

    // --- Fornecedores ---

    pub async fn list_vendors(&self, search: Option<&str>) -> Vec<VendorDetail> {
        let mut vendors = self.crm_repo.list_vendors().await;

        if let Some(term) = search {
            let term = term.to_lowercase();
            vendors.retain(|v| v.name.to_lowercase().contains(&term));
        }

        let receipts = self.grn_repo.list().await;
        vendors
            .into_iter()
            .map(|vendor| {
                let (total_transactions, total_value) = vendor_totals(vendor.id, &receipts);
                VendorDetail {
                    vendor,
                    total_transactions,
                    total_value,
                }
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_vendor(
        &self,
        name: String,
        kind: VendorKind,
        contact_person: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        rating: i16,
    ) -> Vendor {
        let now = Utc::now();
        self.crm_repo
            .insert_vendor(Vendor {
                id: Uuid::new_v4(),
                name,
                kind,
                contact_person,
                email,
                phone,
                address,
                rating,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_vendor(
        &self,
        id: Uuid,
        name: Option<String>,
        kind: Option<VendorKind>,
        contact_person: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        rating: Option<i16>,
    ) -> Result<Vendor, AppError> {
        self.crm_repo
            .update_vendor(id, |v| {
                if let Some(name) = name {
                    v.name = name;
                }
                if let Some(kind) = kind {
                    v.kind = kind;
                }
                if contact_person.is_some() {
                    v.contact_person = contact_person;
                }
                if email.is_some() {
                    v.email = email;
                }
                if phone.is_some() {
                    v.phone = phone;
                }
                if address.is_some() {
                    v.address = address;
                }
                if let Some(rating) = rating {
                    v.rating = rating;
                }
            })
            .await
    }

    pub async fn delete_vendor(&self, id: Uuid) -> Result<(), AppError> {
        self.crm_repo.remove_vendor(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sales::PaymentMethod;
    use chrono::Days;

    fn customer(id: Uuid, name: &str) -> Customer {
        let now = Utc::now();
        Customer {
            id,
            full_name: name.into(),
            email: None,
            phone: None,
            document_number: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sale(customer_id: Uuid, status: SaleStatus, price: i64, days_ago: u64) -> Sale {
        let now = Utc::now();
        Sale {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            customer_id,
            sold_by: None,
            selling_price: Decimal::from(price),
            down_payment: None,
            payment_method: PaymentMethod::Cash,
            status,
            sale_date: now.date_naive() - Days::new(days_ago),
            cost_of_goods: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn customer_totals_follow_completed_sales() {
        let id = Uuid::new_v4();
        let sale_repo = SaleRepository::new(vec![]);
        let service = CrmService::new(
            CrmRepository::new(vec![customer(id, "Ana")], vec![]),
            sale_repo.clone(),
            GrnRepository::new(vec![]),
        );

        let before = service.get_customer(id).await.unwrap();
        assert_eq!(before.total_purchases, 0);
        assert_eq!(before.total_spent, Decimal::ZERO);
        assert_eq!(before.last_purchase_date, None);

        // Uma venda concluída: +1 compra, +preço, data registrada.
        let s = sale(id, SaleStatus::Completed, 200_000_000, 0);
        let sale_date = s.sale_date;
        sale_repo.insert(s).await;

        let after = service.get_customer(id).await.unwrap();
        assert_eq!(after.total_purchases, 1);
        assert_eq!(after.total_spent, Decimal::from(200_000_000));
        assert_eq!(after.last_purchase_date, Some(sale_date));
    }

    #[tokio::test]
    async fn pending_and_cancelled_sales_do_not_count_as_purchases() {
        let id = Uuid::new_v4();
        let service = CrmService::new(
            CrmRepository::new(vec![customer(id, "Bruno")], vec![]),
            SaleRepository::new(vec![
                sale(id, SaleStatus::Pending, 100, 1),
                sale(id, SaleStatus::Cancelled, 200, 2),
            ]),
            GrnRepository::new(vec![]),
        );

        let detail = service.get_customer(id).await.unwrap();
        assert_eq!(detail.total_purchases, 0);
        assert_eq!(detail.total_spent, Decimal::ZERO);
    }

    #[tokio::test]
    async fn last_purchase_date_is_the_most_recent_completed_sale() {
        let id = Uuid::new_v4();
        let recent = sale(id, SaleStatus::Completed, 100, 3);
        let recent_date = recent.sale_date;
        let service = CrmService::new(
            CrmRepository::new(vec![customer(id, "Débora")], vec![]),
            SaleRepository::new(vec![sale(id, SaleStatus::Completed, 100, 30), recent]),
            GrnRepository::new(vec![]),
        );

        let detail = service.get_customer(id).await.unwrap();
        assert_eq!(detail.total_purchases, 2);
        assert_eq!(detail.last_purchase_date, Some(recent_date));
    }

    #[tokio::test]
    async fn vendor_totals_follow_goods_receipts() {
        let vendor_id = Uuid::new_v4();
        let now = Utc::now();
        let vendor = Vendor {
            id: vendor_id,
            name: "LocaSul".into(),
            kind: VendorKind::Leasing,
            contact_person: None,
            email: None,
            phone: None,
            address: None,
            rating: 4,
            created_at: now,
            updated_at: now,
        };
        let receipt = |price: i64, seq: u32| GoodsReceipt {
            id: Uuid::new_v4(),
            document_number: crate::models::grn::format_document_number(2025, seq),
            vehicle_id: Uuid::new_v4(),
            vendor_id,
            purchase_price: Decimal::from(price),
            received_at: now.date_naive(),
            notes: None,
            created_at: now,
        };

        let service = CrmService::new(
            CrmRepository::new(vec![], vec![vendor]),
            SaleRepository::new(vec![]),
            GrnRepository::new(vec![receipt(50_000, 1), receipt(70_000, 2)]),
        );

        let vendors = service.list_vendors(None).await;
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].total_transactions, 2);
        assert_eq!(vendors[0].total_value, Decimal::from(120_000));
    }
}
