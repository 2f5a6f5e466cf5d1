use uuid::Uuid;

use super::errors::DomainError;
use super::sale::{
    NewSaleAggregate, PageResult, PaymentMethodView, SaleFilter, SaleView,
};
use super::status::SaleStatus;

/// Storage boundary for the sale aggregate. The repository is the sole
/// writer of sale and line-item rows.
pub trait SaleRepository: Send + Sync + 'static {
    /// Persists the header and all line items as one atomic unit; no partial
    /// aggregate is ever observable. Returns `CorrelativeTaken` when the
    /// correlative collides with an existing sale.
    fn create(&self, sale: NewSaleAggregate) -> Result<SaleView, DomainError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<SaleView>, DomainError>;

    fn find_by_correlative(&self, correlative: &str) -> Result<Option<SaleView>, DomainError>;

    /// Targeted update of the company payment-confirmation flag. Idempotent;
    /// the returned view is the row produced by the update itself.
    fn set_payment_confirmation(&self, id: Uuid, confirmed: bool)
        -> Result<SaleView, DomainError>;

    /// Transitions the sale to `new_status`, rejecting moves the transition
    /// table forbids. Current-state check and update run under one
    /// transaction so concurrent changes serialize.
    fn change_status(&self, id: Uuid, new_status: SaleStatus) -> Result<SaleView, DomainError>;

    /// Paginated listing, newest first, without line items.
    fn list(
        &self,
        filter: SaleFilter,
        page: i64,
        limit: i64,
    ) -> Result<PageResult<SaleView>, DomainError>;
}

/// Read-only view of the payment-method catalog. Sale creation only needs
/// `find_by_id`; the listings back the pass-through catalog endpoints.
pub trait PaymentMethodCatalog: Send + Sync + 'static {
    fn find_by_id(&self, id: i32) -> Result<Option<PaymentMethodView>, DomainError>;

    fn list_all(&self) -> Result<Vec<PaymentMethodView>, DomainError>;

    fn list(&self, page: i64, limit: i64) -> Result<PageResult<PaymentMethodView>, DomainError>;
}
