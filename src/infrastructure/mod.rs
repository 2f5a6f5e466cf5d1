pub mod models;
pub mod payment_method_repo;
pub mod sale_repo;
