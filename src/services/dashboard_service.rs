// src/services/dashboard_service.rs

use std::collections::BTreeMap;

use chrono::{Days, Utc};
use rust_decimal::Decimal;

use crate::{
    models::{
        dashboard::{DashboardSummary, SalesChartEntry, TopBrandEntry},
        inventory::VehicleStatus,
        sales::SaleStatus,
    },
    services::finance_service::financial_summary,
    store::{ExpenseRepository, NotificationRepository, SaleRepository, VehicleRepository},
};

#[derive(Clone)]
pub struct DashboardService {
    vehicle_repo: VehicleRepository,
    sale_repo: SaleRepository,
    expense_repo: ExpenseRepository,
    notification_repo: NotificationRepository,
}

impl DashboardService {
    pub fn new(
        vehicle_repo: VehicleRepository,
        sale_repo: SaleRepository,
        expense_repo: ExpenseRepository,
        notification_repo: NotificationRepository,
    ) -> Self {
        Self {
            vehicle_repo,
            sale_repo,
            expense_repo,
            notification_repo,
        }
    }

    pub async fn summary(&self) -> DashboardSummary {
        let vehicles = self.vehicle_repo.list().await;
        let sales = self.sale_repo.list().await;
        let expenses = self.expense_repo.list().await;

        // Contagem e receita usam filtros DIFERENTES de propósito: o card
        // de transações conta todas as vendas (pendentes e canceladas
        // inclusive); o financeiro só enxerga as concluídas.
        DashboardSummary {
            vehicles_in_stock: vehicles
                .iter()
                .filter(|v| v.status != VehicleStatus::Sold)
                .count() as i64,
            vehicles_sold: vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::Sold)
                .count() as i64,
            total_transactions: sales.len() as i64,
            pending_sales: sales
                .iter()
                .filter(|s| s.status == SaleStatus::Pending)
                .count() as i64,
            unread_notifications: self.notification_repo.unread_count().await,
            financial: financial_summary(&vehicles, &sales, &expenses),
        }
    }

    // Vendas concluídas dos últimos 30 dias, agrupadas por dia.
    pub async fn sales_chart(&self) -> Vec<SalesChartEntry> {
        let cutoff = Utc::now().date_naive() - Days::new(29);

        let mut by_day: BTreeMap<chrono::NaiveDate, (Decimal, i64)> = BTreeMap::new();
        for sale in self
            .sale_repo
            .list()
            .await
            .iter()
            .filter(|s| s.status == SaleStatus::Completed && s.sale_date >= cutoff)
        {
            let entry = by_day.entry(sale.sale_date).or_insert((Decimal::ZERO, 0));
            entry.0 += sale.selling_price;
            entry.1 += 1;
        }

        by_day
            .into_iter()
            .map(|(date, (total, count))| SalesChartEntry { date, total, count })
            .collect()
    }

    // Ranking de marcas por unidades vendidas (vendas concluídas).
    pub async fn top_brands(&self) -> Vec<TopBrandEntry> {
        let vehicles = self.vehicle_repo.list().await;
        let sales = self.sale_repo.list().await;

        let mut by_brand: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
        for sale in sales.iter().filter(|s| s.status == SaleStatus::Completed) {
            // Venda com veículo órfão fica fora do ranking.
            let Some(vehicle) = vehicles.iter().find(|v| v.id == sale.vehicle_id) else {
                continue;
            };
            let entry = by_brand
                .entry(vehicle.specs.brand.clone())
                .or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += sale.selling_price;
        }

        let mut ranking: Vec<TopBrandEntry> = by_brand
            .into_iter()
            .map(|(brand, (units_sold, total_revenue))| TopBrandEntry {
                brand,
                units_sold,
                total_revenue,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.units_sold
                .cmp(&a.units_sold)
                .then(b.total_revenue.cmp(&a.total_revenue))
        });
        ranking.truncate(5);
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        inventory::{Vehicle, VehicleCondition, VehicleSpecs},
        sales::{PaymentMethod, Sale},
    };
    use uuid::Uuid;

    fn vehicle(brand: &str, status: VehicleStatus) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: Uuid::new_v4(),
            specs: VehicleSpecs {
                brand: brand.into(),
                model: "M".into(),
                year: 2020,
                color: "Prata".into(),
                mileage_km: 10,
                engine: "1.0".into(),
                fuel: "Flex".into(),
                transmission: "Manual".into(),
                seats: 5,
                doors: 4,
                vin: "X".into(),
                plate: "AAA0A00".into(),
            },
            purchase_price: Decimal::from(50_000),
            maintenance_costs: vec![],
            selling_price: Decimal::from(60_000),
            cost_basis: Decimal::from(50_000),
            status,
            condition: VehicleCondition::Good,
            created_at: now,
            updated_at: now,
        }
    }

    fn sale(vehicle_id: Uuid, status: SaleStatus, price: i64, days_ago: u64) -> Sale {
        let now = Utc::now();
        Sale {
            id: Uuid::new_v4(),
            vehicle_id,
            customer_id: Uuid::new_v4(),
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

    fn service(vehicles: Vec<Vehicle>, sales: Vec<Sale>) -> DashboardService {
        DashboardService::new(
            VehicleRepository::new(vehicles),
            SaleRepository::new(sales),
            ExpenseRepository::new(vec![]),
            NotificationRepository::new(vec![]),
        )
    }

    #[tokio::test]
    async fn transaction_count_and_revenue_use_different_filters() {
        let sold = vehicle("Toyota", VehicleStatus::Sold);
        let sold_id = sold.id;
        let svc = service(
            vec![sold, vehicle("Honda", VehicleStatus::Available)],
            vec![
                sale(sold_id, SaleStatus::Completed, 60_000, 1),
                sale(Uuid::new_v4(), SaleStatus::Pending, 99_000, 1),
                sale(Uuid::new_v4(), SaleStatus::Cancelled, 88_000, 2),
            ],
        );

        let summary = svc.summary().await;

        // O card conta as três; o financeiro só enxerga a concluída.
        assert_eq!(summary.total_transactions, 3);
        assert_eq!(summary.pending_sales, 1);
        assert_eq!(summary.financial.total_revenue, Decimal::from(60_000));
        assert_eq!(summary.vehicles_in_stock, 1);
        assert_eq!(summary.vehicles_sold, 1);
    }

    #[tokio::test]
    async fn sales_chart_only_includes_recent_completed_sales() {
        let id = Uuid::new_v4();
        let svc = service(
            vec![],
            vec![
                sale(id, SaleStatus::Completed, 10_000, 1),
                sale(id, SaleStatus::Completed, 20_000, 1),
                sale(id, SaleStatus::Pending, 99_000, 1),
                sale(id, SaleStatus::Completed, 30_000, 45), // fora da janela
            ],
        );

        let chart = svc.sales_chart().await;
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].total, Decimal::from(30_000));
        assert_eq!(chart[0].count, 2);
    }

    #[tokio::test]
    async fn top_brands_ranks_completed_sales_by_brand() {
        let toyota = vehicle("Toyota", VehicleStatus::Sold);
        let toyota2 = vehicle("Toyota", VehicleStatus::Sold);
        let honda = vehicle("Honda", VehicleStatus::Sold);
        let sales = vec![
            sale(toyota.id, SaleStatus::Completed, 60_000, 1),
            sale(toyota2.id, SaleStatus::Completed, 70_000, 2),
            sale(honda.id, SaleStatus::Completed, 90_000, 3),
        ];
        let svc = service(vec![toyota, toyota2, honda], sales);

        let ranking = svc.top_brands().await;
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].brand, "Toyota");
        assert_eq!(ranking[0].units_sold, 2);
        assert_eq!(ranking[0].total_revenue, Decimal::from(130_000));
        assert_eq!(ranking[1].brand, "Honda");
    }
}
