// src/config.rs

use std::env;

use crate::services::{
    auth::AuthService, crm_service::CrmService, dashboard_service::DashboardService,
    export_service::ExportService, finance_service::FinanceService, grn_service::GrnService,
    inventory_service::InventoryService, notification_service::NotificationService,
    sales_service::SalesService, user_service::UserService,
};
use crate::store::{
    seed, CrmRepository, ExpenseRepository, GrnRepository, NotificationRepository,
    SaleRepository, UserRepository, VehicleRepository,
};

// O estado compartilhado que será acessível em toda a aplicação.
// Construído uma única vez no boot e vivo até o processo morrer.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub inventory_service: InventoryService,
    pub grn_service: GrnService,
    pub sales_service: SalesService,
    pub crm_service: CrmService,
    pub finance_service: FinanceService,
    pub dashboard_service: DashboardService,
    pub notification_service: NotificationService,
    pub export_service: ExportService,
}

impl AppState {
    // A assinatura retorna um Result: configuração quebrada impede o boot.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Carrega o conjunto inicial de dados. Não há persistência: é
        // para cá que tudo volta a cada reinício do processo.
        let seed = seed::seed_data()?;
        tracing::info!(
            "✅ Dados de demonstração carregados ({} veículos, {} usuários)",
            seed.vehicles.len(),
            seed.users.len()
        );

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(seed.users);
        let vehicle_repo = VehicleRepository::new(seed.vehicles);
        let grn_repo = GrnRepository::new(seed.receipts);
        let sale_repo = SaleRepository::new(seed.sales);
        let crm_repo = CrmRepository::new(seed.customers, seed.vendors);
        let expense_repo = ExpenseRepository::new(seed.expenses);
        let notification_repo = NotificationRepository::new(seed.notifications);

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let user_service = UserService::new(user_repo, sale_repo.clone());
        let inventory_service = InventoryService::new(vehicle_repo.clone());
        let grn_service = GrnService::new(
            grn_repo.clone(),
            vehicle_repo.clone(),
            crm_repo.clone(),
            notification_repo.clone(),
        );
        let sales_service = SalesService::new(
            sale_repo.clone(),
            vehicle_repo.clone(),
            crm_repo.clone(),
            notification_repo.clone(),
        );
        let crm_service = CrmService::new(crm_repo.clone(), sale_repo.clone(), grn_repo);
        let finance_service = FinanceService::new(
            vehicle_repo.clone(),
            sale_repo.clone(),
            expense_repo.clone(),
        );
        let dashboard_service = DashboardService::new(
            vehicle_repo.clone(),
            sale_repo.clone(),
            expense_repo,
            notification_repo.clone(),
        );
        let notification_service = NotificationService::new(notification_repo);
        let export_service = ExportService::new(vehicle_repo, sale_repo, crm_repo);

        Ok(Self {
            auth_service,
            user_service,
            inventory_service,
            grn_service,
            sales_service,
            crm_service,
            finance_service,
            dashboard_service,
            notification_service,
            export_service,
        })
    }
}
