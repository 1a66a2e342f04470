// src/services/sales_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        crm::Customer,
        inventory::{VehicleStatus, VehicleSummary},
        notification::{Notification, NotificationKind, NotificationPriority},
        sales::{PaymentMethod, Sale, SaleDetail, SaleStatus},
    },
    store::{CrmRepository, NotificationRepository, SaleRepository, VehicleRepository},
};

// A venda aceita cliente já cadastrado ou os dados de um cliente novo,
// criado na hora, o mesmo atalho do formulário original.
pub enum SaleCustomer {
    Existing(Uuid),
    New {
        full_name: String,
        phone: Option<String>,
        email: Option<String>,
    },
}

#[derive(Clone)]
pub struct SalesService {
    sale_repo: SaleRepository,
    vehicle_repo: VehicleRepository,
    crm_repo: CrmRepository,
    notification_repo: NotificationRepository,
}

impl SalesService {
    pub fn new(
        sale_repo: SaleRepository,
        vehicle_repo: VehicleRepository,
        crm_repo: CrmRepository,
        notification_repo: NotificationRepository,
    ) -> Self {
        Self {
            sale_repo,
            vehicle_repo,
            crm_repo,
            notification_repo,
        }
    }

    async fn to_detail(&self, sale: Sale) -> SaleDetail {
        // Veículo órfão vira `null` na resposta, nunca erro.
        let vehicle = self
            .vehicle_repo
            .find_by_id(sale.vehicle_id)
            .await
            .as_ref()
            .map(VehicleSummary::from);
        let customer_name = self
            .crm_repo
            .find_customer(sale.customer_id)
            .await
            .map(|c| c.full_name);
        let profit = sale.profit();
        SaleDetail {
            sale,
            vehicle,
            customer_name,
            profit,
        }
    }

    pub async fn list(
        &self,
        status: Option<SaleStatus>,
        search: Option<&str>,
    ) -> Vec<SaleDetail> {
        let mut sales = self.sale_repo.list().await;
        sales.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));

        if let Some(status) = status {
            sales.retain(|s| s.status == status);
        }

        let mut details = Vec::with_capacity(sales.len());
        for sale in sales {
            details.push(self.to_detail(sale).await);
        }

        if let Some(term) = search {
            let term = term.to_lowercase();
            details.retain(|d| {
                d.customer_name
                    .as_ref()
                    .is_some_and(|n| n.to_lowercase().contains(&term))
                    || d.vehicle
                        .as_ref()
                        .is_some_and(|v| v.plate.to_lowercase().contains(&term))
            });
        }

        details
    }

    pub async fn get(&self, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(id)
            .await
            .ok_or(AppError::SaleNotFound)?;
        Ok(self.to_detail(sale).await)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        customer: SaleCustomer,
        selling_price: Decimal,
        down_payment: Option<Decimal>,
        payment_method: PaymentMethod,
        complete_now: bool,
        sold_by: Option<Uuid>,
    ) -> Result<SaleDetail, AppError> {
        let vehicle = self
            .vehicle_repo
            .find_by_id(vehicle_id)
            .await
            .ok_or(AppError::VehicleNotFound)?;

        if !matches!(
            vehicle.status,
            VehicleStatus::Available | VehicleStatus::Reserved
        ) {
            return Err(AppError::VehicleUnavailable(format!(
                "{} {} não está disponível para venda.",
                vehicle.specs.brand, vehicle.specs.model
            )));
        }

        let customer_id = match customer {
            SaleCustomer::Existing(id) => {
                self.crm_repo
                    .find_customer(id)
                    .await
                    .ok_or(AppError::CustomerNotFound)?
                    .id
            }
            SaleCustomer::New {
                full_name,
                phone,
                email,
            } => {
                let now = Utc::now();
                self.crm_repo
                    .insert_customer(Customer {
                        id: Uuid::new_v4(),
                        full_name,
                        email,
                        phone,
                        document_number: None,
                        address: None,
                        created_at: now,
                        updated_at: now,
                    })
                    .await
                    .id
            }
        };

        let now = Utc::now();
        let sale = self
            .sale_repo
            .insert(Sale {
                id: Uuid::new_v4(),
                vehicle_id,
                customer_id,
                sold_by,
                selling_price,
                down_payment,
                payment_method,
                status: SaleStatus::Pending,
                sale_date: now.date_naive(),
                cost_of_goods: None,
                created_at: now,
                updated_at: now,
            })
            .await;

        // Venda pendente segura o carro: ninguém vende o mesmo veículo
        // duas vezes por engano.
        self.vehicle_repo
            .update(vehicle_id, |v| v.status = VehicleStatus::Reserved)
            .await?;

        if complete_now {
            return self.complete(sale.id).await;
        }

        Ok(self.to_detail(sale).await)
    }

    // Conclusão: o carro vira `sold`, o custo contábil é FOTOGRAFADO na
    // venda e a receita passa a existir. Manutenção lançada depois daqui
    // não mexe mais no lucro desta transação.
    pub async fn complete(&self, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(id)
            .await
            .ok_or(AppError::SaleNotFound)?;

        match sale.status {
            SaleStatus::Pending => {}
            SaleStatus::Completed => {
                return Err(AppError::InvalidSaleTransition(
                    "A venda já foi concluída.".into(),
                ));
            }
            SaleStatus::Cancelled => {
                return Err(AppError::InvalidSaleTransition(
                    "Venda cancelada não pode ser concluída.".into(),
                ));
            }
        }

        let vehicle = self
            .vehicle_repo
            .update(sale.vehicle_id, |v| v.status = VehicleStatus::Sold)
            .await?;

        let sale = self
            .sale_repo
            .update(id, |s| {
                s.status = SaleStatus::Completed;
                s.cost_of_goods = Some(vehicle.cost_basis);
            })
            .await?;

        self.notification_repo
            .insert(Notification {
                id: Uuid::new_v4(),
                kind: NotificationKind::Sales,
                priority: NotificationPriority::High,
                title: "Venda concluída".into(),
                message: format!(
                    "{} {} vendido por {}.",
                    vehicle.specs.brand, vehicle.specs.model, sale.selling_price
                ),
                is_read: false,
                related_id: Some(sale.id.to_string()),
                link: None,
                created_at: Utc::now(),
            })
            .await;

        tracing::info!("Venda {} concluída (veículo {})", sale.id, vehicle.id);

        Ok(self.to_detail(sale).await)
    }

    pub async fn cancel(&self, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(id)
            .await
            .ok_or(AppError::SaleNotFound)?;

        match sale.status {
            SaleStatus::Pending => {}
            SaleStatus::Completed => {
                return Err(AppError::InvalidSaleTransition(
                    "Venda concluída não pode ser cancelada.".into(),
                ));
            }
            SaleStatus::Cancelled => {
                return Err(AppError::InvalidSaleTransition(
                    "A venda já foi cancelada.".into(),
                ));
            }
        }

        let sale = self
            .sale_repo
            .update(id, |s| s.status = SaleStatus::Cancelled)
            .await?;

        // Libera a reserva, se o carro ainda estiver segurado por ela.
        if let Some(vehicle) = self.vehicle_repo.find_by_id(sale.vehicle_id).await {
            if vehicle.status == VehicleStatus::Reserved {
                self.vehicle_repo
                    .update(vehicle.id, |v| v.status = VehicleStatus::Available)
                    .await?;
            }
        }

        Ok(self.to_detail(sale).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::{Vehicle, VehicleCondition, VehicleSpecs};
    use crate::services::finance_service::financial_summary;

    fn vehicle(status: VehicleStatus, purchase: i64) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: Uuid::new_v4(),
            specs: VehicleSpecs {
                brand: "Toyota".into(),
                model: "Corolla".into(),
                year: 2021,
                color: "Prata".into(),
                mileage_km: 48_000,
                engine: "2.0".into(),
                fuel: "Flex".into(),
                transmission: "Automático".into(),
                seats: 5,
                doors: 4,
                vin: "9BR0000000T000001".into(),
                plate: "FQX1A23".into(),
            },
            purchase_price: Decimal::from(purchase),
            maintenance_costs: vec![],
            selling_price: Decimal::from(purchase + 15_000),
            cost_basis: Decimal::from(purchase),
            status,
            condition: VehicleCondition::Excellent,
            created_at: now,
            updated_at: now,
        }
    }

    fn customer(id: Uuid) -> Customer {
        let now = Utc::now();
        Customer {
            id,
            full_name: "Ana Castro".into(),
            email: None,
            phone: None,
            document_number: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn fixture(vehicles: Vec<Vehicle>, customers: Vec<Customer>) -> (SalesService, SaleRepository, VehicleRepository) {
        let sale_repo = SaleRepository::new(vec![]);
        let vehicle_repo = VehicleRepository::new(vehicles);
        let service = SalesService::new(
            sale_repo.clone(),
            vehicle_repo.clone(),
            CrmRepository::new(customers, vec![]),
            NotificationRepository::new(vec![]),
        );
        (service, sale_repo, vehicle_repo)
    }

    #[tokio::test]
    async fn completing_a_sale_marks_the_vehicle_sold_and_snapshots_the_cost() {
        let v = vehicle(VehicleStatus::Available, 100_000);
        let vehicle_id = v.id;
        let customer_id = Uuid::new_v4();
        let (service, sale_repo, vehicle_repo) = fixture(vec![v], vec![customer(customer_id)]);

        let detail = service
            .create(
                vehicle_id,
                SaleCustomer::Existing(customer_id),
                Decimal::from(115_000),
                None,
                PaymentMethod::Transfer,
                true,
                None,
            )
            .await
            .unwrap();

        assert_eq!(detail.sale.status, SaleStatus::Completed);
        assert_eq!(detail.sale.cost_of_goods, Some(Decimal::from(100_000)));
        assert_eq!(detail.profit, Some(Decimal::from(15_000)));

        let sold = vehicle_repo.find_by_id(vehicle_id).await.unwrap();
        assert_eq!(sold.status, VehicleStatus::Sold);

        // As duas pontas concordam: o retrato financeiro enxerga tudo.
        let summary = financial_summary(
            &vehicle_repo.list().await,
            &sale_repo.list().await,
            &[],
        );
        assert_eq!(summary.total_revenue, Decimal::from(115_000));
        assert_eq!(summary.total_cost_of_sales, Decimal::from(100_000));
        assert_eq!(summary.gross_profit, Decimal::from(15_000));
    }

    #[tokio::test]
    async fn maintenance_after_completion_does_not_change_historical_profit() {
        let v = vehicle(VehicleStatus::Available, 100_000);
        let vehicle_id = v.id;
        let customer_id = Uuid::new_v4();
        let (service, _, vehicle_repo) = fixture(vec![v], vec![customer(customer_id)]);

        let detail = service
            .create(
                vehicle_id,
                SaleCustomer::Existing(customer_id),
                Decimal::from(115_000),
                None,
                PaymentMethod::Cash,
                true,
                None,
            )
            .await
            .unwrap();
        let sale_id = detail.sale.id;

        // Manutenção lançada DEPOIS da conclusão muda o custo do carro...
        vehicle_repo
            .update(vehicle_id, |v| {
                v.maintenance_costs.push(crate::models::inventory::MaintenanceCost {
                    id: Uuid::new_v4(),
                    description: "Garantia: troca de bateria".into(),
                    cost: Decimal::from(900),
                    date: Utc::now().date_naive(),
                });
                v.recompute_cost_basis();
            })
            .await
            .unwrap();

        // ...mas o lucro histórico da venda fica no custo fotografado.
        let after = service.get(sale_id).await.unwrap();
        assert_eq!(after.profit, Some(Decimal::from(15_000)));
    }

    #[tokio::test]
    async fn a_pending_sale_reserves_the_vehicle_without_touching_revenue() {
        let v = vehicle(VehicleStatus::Available, 100_000);
        let vehicle_id = v.id;
        let customer_id = Uuid::new_v4();
        let (service, sale_repo, vehicle_repo) = fixture(vec![v], vec![customer(customer_id)]);

        let detail = service
            .create(
                vehicle_id,
                SaleCustomer::Existing(customer_id),
                Decimal::from(115_000),
                Some(Decimal::from(20_000)),
                PaymentMethod::Financing,
                false,
                None,
            )
            .await
            .unwrap();

        assert_eq!(detail.sale.status, SaleStatus::Pending);
        assert_eq!(detail.profit, None);

        let reserved = vehicle_repo.find_by_id(vehicle_id).await.unwrap();
        assert_eq!(reserved.status, VehicleStatus::Reserved);

        let summary = financial_summary(
            &vehicle_repo.list().await,
            &sale_repo.list().await,
            &[],
        );
        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.total_cost_of_sales, Decimal::ZERO);
    }

    #[tokio::test]
    async fn selling_a_sold_vehicle_is_rejected() {
        let v = vehicle(VehicleStatus::Sold, 100_000);
        let vehicle_id = v.id;
        let customer_id = Uuid::new_v4();
        let (service, _, _) = fixture(vec![v], vec![customer(customer_id)]);

        let err = service
            .create(
                vehicle_id,
                SaleCustomer::Existing(customer_id),
                Decimal::from(115_000),
                None,
                PaymentMethod::Cash,
                false,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::VehicleUnavailable(_)));
    }

    #[tokio::test]
    async fn cancelling_a_pending_sale_releases_the_reservation() {
        let v = vehicle(VehicleStatus::Available, 100_000);
        let vehicle_id = v.id;
        let customer_id = Uuid::new_v4();
        let (service, _, vehicle_repo) = fixture(vec![v], vec![customer(customer_id)]);

        let detail = service
            .create(
                vehicle_id,
                SaleCustomer::Existing(customer_id),
                Decimal::from(110_000),
                None,
                PaymentMethod::Cash,
                false,
                None,
            )
            .await
            .unwrap();

        let cancelled = service.cancel(detail.sale.id).await.unwrap();
        assert_eq!(cancelled.sale.status, SaleStatus::Cancelled);

        let released = vehicle_repo.find_by_id(vehicle_id).await.unwrap();
        assert_eq!(released.status, VehicleStatus::Available);

        // Cancelada é terminal: não conclui nem cancela de novo.
        assert!(matches!(
            service.complete(detail.sale.id).await.unwrap_err(),
            AppError::InvalidSaleTransition(_)
        ));
        assert!(matches!(
            service.cancel(detail.sale.id).await.unwrap_err(),
            AppError::InvalidSaleTransition(_)
        ));
    }

    #[tokio::test]
    async fn an_inline_new_customer_is_created_with_the_sale() {
        let v = vehicle(VehicleStatus::Available, 80_000);
        let vehicle_id = v.id;
        let (service, _, _) = fixture(vec![v], vec![]);

        let detail = service
            .create(
                vehicle_id,
                SaleCustomer::New {
                    full_name: "Cliente Novo".into(),
                    phone: Some("+55 11 90000-0000".into()),
                    email: None,
                },
                Decimal::from(90_000),
                None,
                PaymentMethod::Credit,
                false,
                None,
            )
            .await
            .unwrap();

        assert_eq!(detail.customer_name.as_deref(), Some("Cliente Novo"));
    }
}
