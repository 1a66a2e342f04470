pub mod auth;
pub mod crm;
pub mod dashboard;
pub mod exports;
pub mod finance;
pub mod grn;
pub mod inventory;
pub mod notifications;
pub mod reports;
pub mod sales;
pub mod users;
