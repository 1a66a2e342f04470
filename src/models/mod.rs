pub mod auth;
pub mod crm;
pub mod dashboard;
pub mod finance;
pub mod grn;
pub mod inventory;
pub mod notification;
pub mod rbac;
pub mod sales;
