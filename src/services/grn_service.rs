// src/services/grn_service.rs

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        grn::{GoodsReceipt, GoodsReceiptDetail},
        inventory::{Vehicle, VehicleCondition, VehicleSpecs, VehicleStatus, VehicleSummary},
        notification::{Notification, NotificationKind, NotificationPriority},
    },
    store::{CrmRepository, GrnRepository, NotificationRepository, VehicleRepository},
};

#[derive(Clone)]
pub struct GrnService {
    grn_repo: GrnRepository,
    vehicle_repo: VehicleRepository,
    crm_repo: CrmRepository,
    notification_repo: NotificationRepository,
}

impl GrnService {
    pub fn new(
        grn_repo: GrnRepository,
        vehicle_repo: VehicleRepository,
        crm_repo: CrmRepository,
        notification_repo: NotificationRepository,
    ) -> Self {
        Self {
            grn_repo,
            vehicle_repo,
            crm_repo,
            notification_repo,
        }
    }

    pub async fn list(&self) -> Vec<GoodsReceiptDetail> {
        let mut receipts = self.grn_repo.list().await;
        receipts.sort_by(|a, b| b.document_number.cmp(&a.document_number));

        let mut out = Vec::with_capacity(receipts.len());
        for receipt in receipts {
            let vehicle = self
                .vehicle_repo
                .find_by_id(receipt.vehicle_id)
                .await
                .as_ref()
                .map(VehicleSummary::from);
            let vendor_name = self
                .crm_repo
                .find_vendor(receipt.vendor_id)
                .await
                .map(|v| v.name);
            out.push(GoodsReceiptDetail {
                receipt,
                vehicle,
                vendor_name,
            });
        }
        out
    }

    // A entrada é o ÚNICO caminho que cria veículo: a nota nasce junto
    // com o carro, já numerada, e o custo contábil inicial é o próprio
    // preço de compra (manutenção ainda não existe).
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        vendor_id: Uuid,
        specs: VehicleSpecs,
        purchase_price: Decimal,
        selling_price: Decimal,
        condition: VehicleCondition,
        received_at: NaiveDate,
        notes: Option<String>,
    ) -> Result<GoodsReceiptDetail, AppError> {
        let vendor = self
            .crm_repo
            .find_vendor(vendor_id)
            .await
            .ok_or(AppError::VendorNotFound)?;

        let now = Utc::now();
        let vehicle = self
            .vehicle_repo
            .insert(Vehicle {
                id: Uuid::new_v4(),
                specs,
                purchase_price,
                maintenance_costs: vec![],
                selling_price,
                cost_basis: purchase_price,
                status: VehicleStatus::Available,
                condition,
                created_at: now,
                updated_at: now,
            })
            .await;

        let receipt = self
            .grn_repo
            .insert_numbered(received_at.year(), |document_number| GoodsReceipt {
                id: Uuid::new_v4(),
                document_number,
                vehicle_id: vehicle.id,
                vendor_id,
                purchase_price,
                received_at,
                notes,
                created_at: now,
            })
            .await;

        self.notification_repo
            .insert(Notification {
                id: Uuid::new_v4(),
                kind: NotificationKind::Document,
                priority: NotificationPriority::Medium,
                title: format!("Nota {} registrada", receipt.document_number),
                message: format!(
                    "{} {} comprado de {}.",
                    vehicle.specs.brand, vehicle.specs.model, vendor.name
                ),
                is_read: false,
                related_id: Some(vehicle.id.to_string()),
                link: None,
                created_at: now,
            })
            .await;

        tracing::info!(
            "Entrada {} registrada para o veículo {}",
            receipt.document_number,
            vehicle.id
        );

        Ok(GoodsReceiptDetail {
            receipt,
            vehicle: Some(VehicleSummary::from(&vehicle)),
            vendor_name: Some(vendor.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crm::{Vendor, VendorKind};

    fn vendor(id: Uuid) -> Vendor {
        let now = Utc::now();
        Vendor {
            id,
            name: "LocaSul Frotas".into(),
            kind: VendorKind::Leasing,
            contact_person: None,
            email: None,
            phone: None,
            address: None,
            rating: 4,
            created_at: now,
            updated_at: now,
        }
    }

    fn specs(plate: &str) -> VehicleSpecs {
        VehicleSpecs {
            brand: "Chevrolet".into(),
            model: "Tracker".into(),
            year: 2021,
            color: "Branco".into(),
            mileage_km: 40_000,
            engine: "1.0 Turbo".into(),
            fuel: "Flex".into(),
            transmission: "Automático".into(),
            seats: 5,
            doors: 4,
            vin: "9BG0000000T000009".into(),
            plate: plate.into(),
        }
    }

    fn service(vendors: Vec<Vendor>) -> (GrnService, VehicleRepository) {
        let vehicle_repo = VehicleRepository::new(vec![]);
        let service = GrnService::new(
            GrnRepository::new(vec![]),
            vehicle_repo.clone(),
            CrmRepository::new(vec![], vendors),
            NotificationRepository::new(vec![]),
        );
        (service, vehicle_repo)
    }

    #[tokio::test]
    async fn intake_creates_the_vehicle_with_purchase_price_as_cost_basis() {
        let vendor_id = Uuid::new_v4();
        let (service, vehicle_repo) = service(vec![vendor(vendor_id)]);

        let detail = service
            .create(
                vendor_id,
                specs("XYZ9Z99"),
                Decimal::from(85_000),
                Decimal::from(97_900),
                VehicleCondition::Good,
                Utc::now().date_naive(),
                None,
            )
            .await
            .unwrap();

        let vehicle = vehicle_repo
            .find_by_id(detail.receipt.vehicle_id)
            .await
            .unwrap();
        assert_eq!(vehicle.cost_basis, Decimal::from(85_000));
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(detail.vendor_name.as_deref(), Some("LocaSul Frotas"));
    }

    #[tokio::test]
    async fn document_numbers_are_sequential_within_the_year() {
        let vendor_id = Uuid::new_v4();
        let (service, _) = service(vec![vendor(vendor_id)]);
        let today = Utc::now().date_naive();
        let year = today.year();

        let first = service
            .create(
                vendor_id,
                specs("AAA1A11"),
                Decimal::from(50_000),
                Decimal::from(58_000),
                VehicleCondition::Good,
                today,
                None,
            )
            .await
            .unwrap();
        let second = service
            .create(
                vendor_id,
                specs("BBB2B22"),
                Decimal::from(60_000),
                Decimal::from(69_000),
                VehicleCondition::Excellent,
                today,
                None,
            )
            .await
            .unwrap();

        assert_eq!(
            first.receipt.document_number,
            format!("GRN-{year}-0001")
        );
        assert_eq!(
            second.receipt.document_number,
            format!("GRN-{year}-0002")
        );
    }

    #[tokio::test]
    async fn intake_against_an_unknown_vendor_fails() {
        let (service, _) = service(vec![]);
        let err = service
            .create(
                Uuid::new_v4(),
                specs("CCC3C33"),
                Decimal::from(50_000),
                Decimal::from(58_000),
                VehicleCondition::Fair,
                Utc::now().date_naive(),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::VendorNotFound));
    }
}
