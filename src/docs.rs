// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,
        handlers::auth::my_permissions,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- INVENTORY ---
        handlers::inventory::list_vehicles,
        handlers::inventory::get_vehicle,
        handlers::inventory::update_vehicle,
        handlers::inventory::add_maintenance,
        handlers::inventory::delete_vehicle,

        // --- GRN ---
        handlers::grn::list_receipts,
        handlers::grn::create_receipt,

        // --- SALES ---
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::create_sale,
        handlers::sales::complete_sale,
        handlers::sales::cancel_sale,

        // --- CRM ---
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::create_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,
        handlers::crm::list_vendors,
        handlers::crm::create_vendor,
        handlers::crm::update_vendor,
        handlers::crm::delete_vendor,

        // --- FINANCE ---
        handlers::finance::list_expenses,
        handlers::finance::create_expense,
        handlers::finance::delete_expense,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_sales_chart,
        handlers::dashboard::get_top_brands,

        // --- Reports ---
        handlers::reports::financial_report,
        handlers::reports::vehicle_profit_report,
        handlers::reports::stock_aging_report,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_read,
        handlers::notifications::mark_all_read,

        // --- Exports ---
        handlers::exports::export_vehicles,
        handlers::exports::export_sales,
        handlers::exports::export_customers,
    ),
    components(
        schemas(
            // --- Auth / RBAC ---
            models::auth::User,
            models::auth::SessionUser,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::rbac::Role,
            models::rbac::Module,
            models::rbac::ModulePermissions,

            // --- Inventory ---
            models::inventory::VehicleStatus,
            models::inventory::VehicleCondition,
            models::inventory::VehicleSpecs,
            models::inventory::MaintenanceCost,
            models::inventory::Vehicle,
            models::inventory::VehicleSummary,

            // --- GRN ---
            models::grn::GoodsReceipt,
            models::grn::GoodsReceiptDetail,

            // --- Sales ---
            models::sales::SaleStatus,
            models::sales::PaymentMethod,
            models::sales::Sale,
            models::sales::SaleDetail,

            // --- CRM ---
            models::crm::Customer,
            models::crm::CustomerDetail,
            models::crm::VendorKind,
            models::crm::Vendor,
            models::crm::VendorDetail,

            // --- Finance ---
            models::finance::Expense,
            models::finance::FinancialSummary,
            models::finance::VehicleProfitEntry,
            models::finance::StockAgingBucket,

            // --- Notifications ---
            models::notification::NotificationKind,
            models::notification::NotificationPriority,
            models::notification::Notification,
            models::notification::NotificationDetail,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::SalesChartEntry,
            models::dashboard::TopBrandEntry,

            // --- Payloads ---
            handlers::users::CreateUserPayload,
            handlers::users::UpdateUserPayload,
            handlers::users::UserDeleteResponse,
            handlers::inventory::UpdateVehiclePayload,
            handlers::inventory::AddMaintenancePayload,
            handlers::grn::CreateGrnPayload,
            handlers::sales::NewCustomerPayload,
            handlers::sales::CreateSalePayload,
            handlers::crm::CreateCustomerPayload,
            handlers::crm::UpdateCustomerPayload,
            handlers::crm::CreateVendorPayload,
            handlers::crm::UpdateVendorPayload,
            handlers::finance::CreateExpensePayload,
            handlers::notifications::MarkAllReadResponse,
            handlers::exports::ExportFormat,
            services::user_service::UserDeleteOutcome,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e sessão"),
        (name = "Users", description = "Gestão de usuários e papéis"),
        (name = "Inventory", description = "Estoque de veículos"),
        (name = "GRN", description = "Notas de entrada (compra de veículos)"),
        (name = "Sales", description = "Vendas e transições de status"),
        (name = "CRM", description = "Clientes e fornecedores"),
        (name = "Finance", description = "Despesas operacionais"),
        (name = "Dashboard", description = "Indicadores e gráficos do painel"),
        (name = "Reports", description = "Relatórios financeiros e de estoque"),
        (name = "Notifications", description = "Central de notificações"),
        (name = "Exports", description = "Exportação CSV/XLS")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
