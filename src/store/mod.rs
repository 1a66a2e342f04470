pub mod crm_repo;
pub mod expense_repo;
pub mod grn_repo;
pub mod notification_repo;
pub mod sale_repo;
pub mod seed;
pub mod user_repo;
pub mod vehicle_repo;

pub use crm_repo::CrmRepository;
pub use expense_repo::ExpenseRepository;
pub use grn_repo::GrnRepository;
pub use notification_repo::NotificationRepository;
pub use sale_repo::SaleRepository;
pub use user_repo::UserRepository;
pub use vehicle_repo::VehicleRepository;
