use crate::domain::errors::DomainError;
use crate::domain::ports::PaymentMethodCatalog;
use crate::domain::sale::{PageResult, PaymentMethodView};

/// Thin pass-through over the catalog port for the read-only payment-method
/// endpoints. The catalog itself is maintained elsewhere; this core only
/// reads it.
pub struct PaymentMethodService<P> {
    catalog: P,
}

impl<P: PaymentMethodCatalog> PaymentMethodService<P> {
    pub fn new(catalog: P) -> Self {
        Self { catalog }
    }

    pub fn get_by_id(&self, id: i32) -> Result<PaymentMethodView, DomainError> {
        self.catalog
            .find_by_id(id)?
            .ok_or(DomainError::PaymentMethodNotFound(id))
    }

    pub fn list_all(&self) -> Result<Vec<PaymentMethodView>, DomainError> {
        self.catalog.list_all()
    }

    pub fn list(&self, page: i64, limit: i64) -> Result<PageResult<PaymentMethodView>, DomainError> {
        self.catalog.list(page, limit)
    }
}
