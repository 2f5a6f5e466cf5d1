pub mod correlative;
pub mod payment_method_service;
pub mod sale_service;
