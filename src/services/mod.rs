pub mod auth;
pub mod crm_service;
pub mod dashboard_service;
pub mod export_service;
pub mod finance_service;
pub mod grn_service;
pub mod inventory_service;
pub mod notification_service;
pub mod sales_service;
pub mod user_service;
