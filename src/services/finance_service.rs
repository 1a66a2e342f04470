// src/services/finance_service.rs

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        finance::{Expense, FinancialSummary, StockAgingBucket, VehicleProfitEntry},
        inventory::{Vehicle, VehicleStatus},
        sales::{Sale, SaleStatus},
    },
    store::{ExpenseRepository, SaleRepository, VehicleRepository},
};

// Deriva o retrato financeiro a partir das três coleções. Função pura e
// determinística: entradas vazias produzem tudo zero e a ordem dos
// elementos não importa (só há somas).
pub fn financial_summary(
    vehicles: &[Vehicle],
    sales: &[Sale],
    expenses: &[Expense],
) -> FinancialSummary {
    let completed: Vec<&Sale> = sales
        .iter()
        .filter(|s| s.status == SaleStatus::Completed)
        .collect();

    let total_revenue: Decimal = completed.iter().map(|s| s.selling_price).sum();

    // Um carro só entra no custo quando as duas pontas concordam: status
    // `sold` NO veículo E venda concluída apontando para ele. Carro
    // marcado como vendido sem venda concluída registrada fica fora da
    // contabilidade até as duas coisas baterem.
    let completed_vehicle_ids: HashSet<Uuid> = completed.iter().map(|s| s.vehicle_id).collect();
    let total_cost_of_sales: Decimal = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Sold && completed_vehicle_ids.contains(&v.id))
        .map(|v| v.cost_basis)
        .sum();

    let gross_profit = total_revenue - total_cost_of_sales;

    // Sem filtro de data aqui: quem quer um recorte de período filtra as
    // coleções antes de chamar.
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();

    FinancialSummary {
        total_revenue,
        total_cost_of_sales,
        gross_profit,
        total_expenses,
        net_profit: gross_profit - total_expenses,
    }
}

// Lucro de um veículo para as tabelas agregadas: preço da venda concluída
// correspondente menos o custo contábil ATUAL do carro. Sem venda
// concluída, zero: pendente e cancelada nunca aparecem como lucro.
pub fn vehicle_profit(vehicle: &Vehicle, sales: &[Sale]) -> Decimal {
    sales
        .iter()
        .find(|s| s.status == SaleStatus::Completed && s.vehicle_id == vehicle.id)
        .map(|s| s.selling_price - vehicle.cost_basis)
        .unwrap_or(Decimal::ZERO)
}

#[derive(Clone)]
pub struct FinanceService {
    vehicle_repo: VehicleRepository,
    sale_repo: SaleRepository,
    expense_repo: ExpenseRepository,
}

impl FinanceService {
    pub fn new(
        vehicle_repo: VehicleRepository,
        sale_repo: SaleRepository,
        expense_repo: ExpenseRepository,
    ) -> Self {
        Self {
            vehicle_repo,
            sale_repo,
            expense_repo,
        }
    }

    // Recorte de período: pré-filtra vendas (pela data da venda) e
    // despesas (pela data da despesa) e só então deriva o retrato.
    pub async fn period_summary(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> FinancialSummary {
        let in_period =
            |date: NaiveDate| from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t);

        let vehicles = self.vehicle_repo.list().await;
        let sales: Vec<_> = self
            .sale_repo
            .list()
            .await
            .into_iter()
            .filter(|s| in_period(s.sale_date))
            .collect();
        let expenses: Vec<_> = self
            .expense_repo
            .list()
            .await
            .into_iter()
            .filter(|e| in_period(e.expense_date))
            .collect();

        financial_summary(&vehicles, &sales, &expenses)
    }

    pub async fn vehicle_profit_report(&self) -> Vec<VehicleProfitEntry> {
        let vehicles = self.vehicle_repo.list().await;
        let sales = self.sale_repo.list().await;

        vehicles
            .iter()
            .map(|v| VehicleProfitEntry {
                vehicle_id: v.id,
                brand: v.specs.brand.clone(),
                model: v.specs.model.clone(),
                plate: v.specs.plate.clone(),
                selling_price: v.selling_price,
                cost_basis: v.cost_basis,
                profit: vehicle_profit(v, &sales),
            })
            .collect()
    }

    // Envelhecimento do estoque: dias em pátio dos veículos não vendidos,
    // nas faixas clássicas de 30 dias.
    pub async fn stock_aging(&self) -> Vec<StockAgingBucket> {
        let today = Utc::now().date_naive();
        let vehicles = self.vehicle_repo.list().await;

        let buckets: [(&str, i64, i64); 4] = [
            ("0-30", 0, 30),
            ("31-60", 31, 60),
            ("61-90", 61, 90),
            ("90+", 91, i64::MAX),
        ];

        buckets
            .iter()
            .map(|(label, min, max)| {
                let mut count = 0;
                let mut total_cost = Decimal::ZERO;
                for v in vehicles.iter().filter(|v| v.status != VehicleStatus::Sold) {
                    let days = (today - v.created_at.date_naive()).num_days().max(0);
                    if days >= *min && days <= *max {
                        count += 1;
                        total_cost += v.cost_basis;
                    }
                }
                StockAgingBucket {
                    label: (*label).to_string(),
                    count,
                    total_cost,
                }
            })
            .collect()
    }

    // --- Despesas ---

    pub async fn list_expenses(&self) -> Vec<Expense> {
        let mut expenses = self.expense_repo.list().await;
        expenses.sort_by(|a, b| b.expense_date.cmp(&a.expense_date));
        expenses
    }

    pub async fn create_expense(
        &self,
        description: String,
        category: String,
        amount: Decimal,
        expense_date: NaiveDate,
    ) -> Expense {
        self.expense_repo
            .insert(Expense {
                id: Uuid::new_v4(),
                description,
                category,
                amount,
                expense_date,
                created_at: Utc::now(),
            })
            .await
    }

    pub async fn delete_expense(&self, id: Uuid) -> Result<(), AppError> {
        self.expense_repo.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::{VehicleCondition, VehicleSpecs};
    use crate::models::sales::PaymentMethod;

    fn vehicle(id: Uuid, status: VehicleStatus, cost_basis: i64) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id,
            specs: VehicleSpecs {
                brand: "Toyota".into(),
                model: "Etios".into(),
                year: 2019,
                color: "Prata".into(),
                mileage_km: 60_000,
                engine: "1.5".into(),
                fuel: "Flex".into(),
                transmission: "Manual".into(),
                seats: 5,
                doors: 4,
                vin: "9BR0000000T000001".into(),
                plate: "AAA0A00".into(),
            },
            purchase_price: Decimal::from(cost_basis),
            maintenance_costs: vec![],
            selling_price: Decimal::from(cost_basis + 10),
            cost_basis: Decimal::from(cost_basis),
            status,
            condition: VehicleCondition::Good,
            created_at: now,
            updated_at: now,
        }
    }

    fn sale(vehicle_id: Uuid, status: SaleStatus, price: i64) -> Sale {
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
            sale_date: now.date_naive(),
            cost_of_goods: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn zero_summary() -> FinancialSummary {
        FinancialSummary {
            total_revenue: Decimal::ZERO,
            total_cost_of_sales: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            net_profit: Decimal::ZERO,
        }
    }

    fn expense(amount: i64) -> Expense {
        let now = Utc::now();
        Expense {
            id: Uuid::new_v4(),
            description: "d".into(),
            category: "c".into(),
            amount: Decimal::from(amount),
            expense_date: now.date_naive(),
            created_at: now,
        }
    }

    #[test]
    fn empty_inputs_yield_all_zero() {
        assert_eq!(financial_summary(&[], &[], &[]), zero_summary());
    }

    #[test]
    fn sold_vehicle_without_completed_sale_stays_out_of_cost() {
        // Carro marcado vendido, venda ainda pendente: nada entra.
        let id = Uuid::new_v4();
        let vehicles = [vehicle(id, VehicleStatus::Sold, 100)];
        let mut sales = [sale(id, SaleStatus::Pending, 150)];

        let summary = financial_summary(&vehicles, &sales, &[]);
        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.total_cost_of_sales, Decimal::ZERO);
        assert_eq!(summary.gross_profit, Decimal::ZERO);

        // A mesma venda concluída: as duas pontas concordam e tudo entra.
        sales[0].status = SaleStatus::Completed;
        let summary = financial_summary(&vehicles, &sales, &[]);
        assert_eq!(summary.total_revenue, Decimal::from(150));
        assert_eq!(summary.total_cost_of_sales, Decimal::from(100));
        assert_eq!(summary.gross_profit, Decimal::from(50));
    }

    #[test]
    fn completed_sale_against_unsold_vehicle_counts_revenue_but_not_cost() {
        // A conjunção vale nos dois sentidos: a receita entra pela venda
        // concluída, mas o custo espera o status do carro virar `sold`.
        let id = Uuid::new_v4();
        let vehicles = [vehicle(id, VehicleStatus::Available, 100)];
        let sales = [sale(id, SaleStatus::Completed, 150)];

        let summary = financial_summary(&vehicles, &sales, &[]);
        assert_eq!(summary.total_revenue, Decimal::from(150));
        assert_eq!(summary.total_cost_of_sales, Decimal::ZERO);
        assert_eq!(summary.gross_profit, Decimal::from(150));
    }

    #[test]
    fn cancelled_sales_never_contribute_revenue() {
        let id = Uuid::new_v4();
        let vehicles = [vehicle(id, VehicleStatus::Sold, 100)];
        let sales = [sale(id, SaleStatus::Cancelled, 150)];

        let summary = financial_summary(&vehicles, &sales, &[]);
        assert_eq!(summary, zero_summary());
    }

    #[test]
    fn expenses_reduce_net_profit_only() {
        let id = Uuid::new_v4();
        let vehicles = [vehicle(id, VehicleStatus::Sold, 100)];
        let sales = [sale(id, SaleStatus::Completed, 150)];
        let expenses = [expense(30), expense(5)];

        let summary = financial_summary(&vehicles, &sales, &expenses);
        assert_eq!(summary.gross_profit, Decimal::from(50));
        assert_eq!(summary.total_expenses, Decimal::from(35));
        assert_eq!(summary.net_profit, Decimal::from(15));
    }

    #[test]
    fn vehicle_profit_is_zero_without_a_completed_sale() {
        let id = Uuid::new_v4();
        let v = vehicle(id, VehicleStatus::Sold, 100);

        assert_eq!(vehicle_profit(&v, &[]), Decimal::ZERO);
        assert_eq!(
            vehicle_profit(&v, &[sale(id, SaleStatus::Pending, 150)]),
            Decimal::ZERO
        );
        assert_eq!(
            vehicle_profit(&v, &[sale(id, SaleStatus::Completed, 150)]),
            Decimal::from(50)
        );
    }

    #[tokio::test]
    async fn period_summary_prefilters_sales_and_expenses() {
        let id = Uuid::new_v4();
        let mut old_sale = sale(id, SaleStatus::Completed, 150);
        old_sale.sale_date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let mut recent_expense = expense(30);
        recent_expense.expense_date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let service = FinanceService::new(
            VehicleRepository::new(vec![vehicle(id, VehicleStatus::Sold, 100)]),
            SaleRepository::new(vec![old_sale]),
            ExpenseRepository::new(vec![recent_expense]),
        );

        // Janela que só cobre 2025: a venda de 2024 fica de fora, a
        // despesa de 2025 fica dentro.
        let summary = service
            .period_summary(
                NaiveDate::from_ymd_opt(2025, 1, 1),
                NaiveDate::from_ymd_opt(2025, 12, 31),
            )
            .await;

        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.total_expenses, Decimal::from(30));
        assert_eq!(summary.net_profit, Decimal::from(-30));
    }
}
