use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::line_items::accumulate_lines;
use crate::domain::ports::{PaymentMethodCatalog, SaleRepository};
use crate::domain::sale::{
    CreateSaleInput, NewSaleAggregate, PageResult, SaleFilter, SaleView,
};
use crate::domain::status::SaleStatus;

use super::correlative::next_correlative;

/// Attempts before giving up on finding a free correlative. Collisions are
/// already vanishingly rare; more than a couple in a row means something is
/// wrong with the generator, not bad luck.
const MAX_CORRELATIVE_ATTEMPTS: u32 = 3;

/// Orchestrates sale creation and lifecycle mutations over the storage and
/// catalog ports. The service holds no state of its own; all mutation goes
/// through the repository.
pub struct SaleService<R, P> {
    sales: R,
    payment_methods: P,
}

impl<R: SaleRepository, P: PaymentMethodCatalog> SaleService<R, P> {
    pub fn new(sales: R, payment_methods: P) -> Self {
        Self {
            sales,
            payment_methods,
        }
    }

    /// Creates a sale with its line items in one atomic write.
    ///
    /// Resolves the payment method, validates and prices the lines, then
    /// persists under a generated correlative, retrying with a fresh one if
    /// the unique index reports a collision. Any failure before the commit
    /// leaves no partial aggregate behind.
    pub fn create_sale(&self, input: CreateSaleInput) -> Result<SaleView, DomainError> {
        let method = self
            .payment_methods
            .find_by_id(input.payment_method_id)?
            .ok_or(DomainError::PaymentMethodNotFound(input.payment_method_id))?;

        let (lines, total) = accumulate_lines(&input.lines)?;

        for _ in 0..MAX_CORRELATIVE_ATTEMPTS {
            let correlative = next_correlative();
            let aggregate = NewSaleAggregate {
                correlative,
                payment_method_id: method.id,
                buyer_id: input.buyer_id,
                selling_company_id: input.selling_company_id,
                broker_id: input.broker_id,
                total: total.clone(),
                lines: lines.clone(),
            };
            match self.sales.create(aggregate) {
                Err(DomainError::CorrelativeTaken(taken)) => {
                    log::warn!("correlative {} already in use, retrying", taken);
                }
                other => return other,
            }
        }

        Err(DomainError::Internal(format!(
            "could not allocate a unique correlative after {} attempts",
            MAX_CORRELATIVE_ATTEMPTS
        )))
    }

    pub fn get_sale(&self, id: Uuid) -> Result<SaleView, DomainError> {
        self.sales
            .find_by_id(id)?
            .ok_or(DomainError::SaleNotFound(id))
    }

    pub fn get_by_correlative(&self, correlative: &str) -> Result<SaleView, DomainError> {
        self.sales
            .find_by_correlative(correlative)?
            .ok_or_else(|| DomainError::CorrelativeNotFound(correlative.to_string()))
    }

    /// Marks or reverts the company's payment confirmation. Idempotent and
    /// independent of the sale status.
    pub fn confirm_payment(&self, id: Uuid, confirmed: bool) -> Result<SaleView, DomainError> {
        self.sales.set_payment_confirmation(id, confirmed)
    }

    pub fn change_status(
        &self,
        id: Uuid,
        new_status: SaleStatus,
    ) -> Result<SaleView, DomainError> {
        self.sales.change_status(id, new_status)
    }

    pub fn list_sales(
        &self,
        filter: SaleFilter,
        page: i64,
        limit: i64,
    ) -> Result<PageResult<SaleView>, DomainError> {
        self.sales.list(filter, page, limit)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::domain::sale::{PaymentMethodView, SaleLineRequest, SaleLineView};

    use super::*;

    // ── In-memory ports ───────────────────────────────────────────────────────

    struct InMemorySaleRepo {
        sales: Mutex<Vec<SaleView>>,
    }

    impl InMemorySaleRepo {
        fn new() -> Self {
            Self {
                sales: Mutex::new(Vec::new()),
            }
        }

        fn stored_count(&self) -> usize {
            self.sales.lock().unwrap().len()
        }
    }

    impl SaleRepository for InMemorySaleRepo {
        fn create(&self, sale: NewSaleAggregate) -> Result<SaleView, DomainError> {
            let mut sales = self.sales.lock().unwrap();
            if sales.iter().any(|s| s.correlative == sale.correlative) {
                return Err(DomainError::CorrelativeTaken(sale.correlative));
            }
            let now = Utc::now();
            let view = SaleView {
                id: Uuid::new_v4(),
                correlative: sale.correlative,
                status: SaleStatus::Pending,
                total: sale.total,
                payment_confirmed_by_company: false,
                payment_method_id: sale.payment_method_id,
                payment_method_name: "stub".to_string(),
                buyer_id: sale.buyer_id,
                selling_company_id: sale.selling_company_id,
                broker_id: sale.broker_id,
                created_at: now,
                updated_at: now,
                lines: sale
                    .lines
                    .into_iter()
                    .map(|l| SaleLineView {
                        id: Uuid::new_v4(),
                        product_id: l.product_id,
                        product_name: l.product_name,
                        quantity: l.quantity,
                        unit_price: l.unit_price,
                        subtotal: l.subtotal,
                    })
                    .collect(),
            };
            sales.push(view.clone());
            Ok(view)
        }

        fn find_by_id(&self, id: Uuid) -> Result<Option<SaleView>, DomainError> {
            Ok(self.sales.lock().unwrap().iter().find(|s| s.id == id).cloned())
        }

        fn find_by_correlative(
            &self,
            correlative: &str,
        ) -> Result<Option<SaleView>, DomainError> {
            Ok(self
                .sales
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.correlative == correlative)
                .cloned())
        }

        fn set_payment_confirmation(
            &self,
            id: Uuid,
            confirmed: bool,
        ) -> Result<SaleView, DomainError> {
            let mut sales = self.sales.lock().unwrap();
            let sale = sales
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(DomainError::SaleNotFound(id))?;
            sale.payment_confirmed_by_company = confirmed;
            sale.updated_at = Utc::now();
            Ok(sale.clone())
        }

        fn change_status(
            &self,
            id: Uuid,
            new_status: SaleStatus,
        ) -> Result<SaleView, DomainError> {
            let mut sales = self.sales.lock().unwrap();
            let sale = sales
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(DomainError::SaleNotFound(id))?;
            if !sale.status.can_transition_to(new_status) {
                return Err(DomainError::InvalidTransition {
                    from: sale.status,
                    to: new_status,
                });
            }
            sale.status = new_status;
            sale.updated_at = Utc::now();
            Ok(sale.clone())
        }

        fn list(
            &self,
            filter: SaleFilter,
            page: i64,
            limit: i64,
        ) -> Result<PageResult<SaleView>, DomainError> {
            let sales = self.sales.lock().unwrap();
            let matching: Vec<SaleView> = sales
                .iter()
                .filter(|s| match filter {
                    SaleFilter::All => true,
                    SaleFilter::Buyer(b) => s.buyer_id == b,
                    SaleFilter::SellingCompany(c) => s.selling_company_id == Some(c),
                    SaleFilter::Broker(b) => s.broker_id == Some(b),
                })
                .cloned()
                .collect();
            let total = matching.len() as i64;
            let offset = ((page - 1) * limit) as usize;
            let items = matching
                .into_iter()
                .skip(offset)
                .take(limit as usize)
                .collect();
            Ok(PageResult { items, total })
        }
    }

    /// Delegates to an inner repo but reports the first `collisions` creates
    /// as correlative conflicts, to exercise the retry loop.
    struct CollidingSaleRepo {
        inner: InMemorySaleRepo,
        collisions_left: Mutex<u32>,
    }

    impl SaleRepository for CollidingSaleRepo {
        fn create(&self, sale: NewSaleAggregate) -> Result<SaleView, DomainError> {
            let mut left = self.collisions_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err(DomainError::CorrelativeTaken(sale.correlative));
            }
            drop(left);
            self.inner.create(sale)
        }

        fn find_by_id(&self, id: Uuid) -> Result<Option<SaleView>, DomainError> {
            self.inner.find_by_id(id)
        }

        fn find_by_correlative(
            &self,
            correlative: &str,
        ) -> Result<Option<SaleView>, DomainError> {
            self.inner.find_by_correlative(correlative)
        }

        fn set_payment_confirmation(
            &self,
            id: Uuid,
            confirmed: bool,
        ) -> Result<SaleView, DomainError> {
            self.inner.set_payment_confirmation(id, confirmed)
        }

        fn change_status(
            &self,
            id: Uuid,
            new_status: SaleStatus,
        ) -> Result<SaleView, DomainError> {
            self.inner.change_status(id, new_status)
        }

        fn list(
            &self,
            filter: SaleFilter,
            page: i64,
            limit: i64,
        ) -> Result<PageResult<SaleView>, DomainError> {
            self.inner.list(filter, page, limit)
        }
    }

    struct InMemoryCatalog {
        methods: Vec<PaymentMethodView>,
    }

    impl InMemoryCatalog {
        fn with_card() -> Self {
            Self {
                methods: vec![PaymentMethodView {
                    id: 1,
                    name: "Card".to_string(),
                    description: None,
                }],
            }
        }
    }

    impl PaymentMethodCatalog for InMemoryCatalog {
        fn find_by_id(&self, id: i32) -> Result<Option<PaymentMethodView>, DomainError> {
            Ok(self.methods.iter().find(|m| m.id == id).cloned())
        }

        fn list_all(&self) -> Result<Vec<PaymentMethodView>, DomainError> {
            Ok(self.methods.clone())
        }

        fn list(
            &self,
            page: i64,
            limit: i64,
        ) -> Result<PageResult<PaymentMethodView>, DomainError> {
            let offset = ((page - 1) * limit) as usize;
            Ok(PageResult {
                items: self
                    .methods
                    .iter()
                    .skip(offset)
                    .take(limit as usize)
                    .cloned()
                    .collect(),
                total: self.methods.len() as i64,
            })
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn service() -> SaleService<InMemorySaleRepo, InMemoryCatalog> {
        SaleService::new(InMemorySaleRepo::new(), InMemoryCatalog::with_card())
    }

    fn decimal(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn line(quantity: i32, unit_price: &str) -> SaleLineRequest {
        SaleLineRequest {
            product_id: 42,
            product_name: "Widget".to_string(),
            quantity,
            unit_price: decimal(unit_price),
        }
    }

    fn input(lines: Vec<SaleLineRequest>) -> CreateSaleInput {
        CreateSaleInput {
            payment_method_id: 1,
            buyer_id: 10,
            selling_company_id: Some(20),
            broker_id: None,
            lines,
        }
    }

    // ── Creation ──────────────────────────────────────────────────────────────

    #[test]
    fn create_computes_total_and_defaults() {
        let service = service();

        let sale = service
            .create_sale(input(vec![line(2, "10.50"), line(1, "5.00")]))
            .expect("create failed");

        assert_eq!(sale.total, decimal("26.00"));
        assert_eq!(sale.status, SaleStatus::Pending);
        assert!(!sale.payment_confirmed_by_company);
        assert!(sale.correlative.starts_with("VEN-"));
        assert_eq!(sale.lines.len(), 2);
        assert_eq!(sale.lines[0].subtotal, decimal("21.00"));
        assert_eq!(sale.lines[1].subtotal, decimal("5.00"));
    }

    #[test]
    fn create_rejects_unknown_payment_method_without_persisting() {
        let repo = InMemorySaleRepo::new();
        let service = SaleService::new(repo, InMemoryCatalog::with_card());

        let mut request = input(vec![line(1, "1.00")]);
        request.payment_method_id = 999;
        let err = service.create_sale(request).unwrap_err();

        assert!(matches!(err, DomainError::PaymentMethodNotFound(999)));
        assert_eq!(service.sales.stored_count(), 0);
    }

    #[test]
    fn create_rejects_empty_lines_without_persisting() {
        let service = service();

        let err = service.create_sale(input(vec![])).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(service.sales.stored_count(), 0);
    }

    #[test]
    fn create_rejects_invalid_quantity_without_persisting() {
        let service = service();

        let err = service
            .create_sale(input(vec![line(0, "1.00")]))
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(service.sales.stored_count(), 0);
    }

    #[test]
    fn create_retries_on_correlative_collision() {
        let repo = CollidingSaleRepo {
            inner: InMemorySaleRepo::new(),
            collisions_left: Mutex::new(2),
        };
        let service = SaleService::new(repo, InMemoryCatalog::with_card());

        let sale = service
            .create_sale(input(vec![line(1, "1.00")]))
            .expect("create should succeed after retries");

        assert!(sale.correlative.starts_with("VEN-"));
        assert_eq!(service.sales.inner.stored_count(), 1);
    }

    #[test]
    fn create_gives_up_after_exhausting_attempts() {
        let repo = CollidingSaleRepo {
            inner: InMemorySaleRepo::new(),
            collisions_left: Mutex::new(MAX_CORRELATIVE_ATTEMPTS),
        };
        let service = SaleService::new(repo, InMemoryCatalog::with_card());

        let err = service
            .create_sale(input(vec![line(1, "1.00")]))
            .unwrap_err();

        assert!(matches!(err, DomainError::Internal(_)));
        assert_eq!(service.sales.inner.stored_count(), 0);
    }

    // ── Lookups ───────────────────────────────────────────────────────────────

    #[test]
    fn get_sale_returns_not_found_for_unknown_id() {
        let service = service();
        let id = Uuid::new_v4();

        let err = service.get_sale(id).unwrap_err();

        assert!(matches!(err, DomainError::SaleNotFound(found) if found == id));
    }

    #[test]
    fn get_by_correlative_round_trips() {
        let service = service();
        let created = service
            .create_sale(input(vec![line(1, "3.00")]))
            .expect("create failed");

        let fetched = service
            .get_by_correlative(&created.correlative)
            .expect("lookup failed");

        assert_eq!(fetched.id, created.id);

        let err = service.get_by_correlative("VEN-MISSING").unwrap_err();
        assert!(matches!(err, DomainError::CorrelativeNotFound(_)));
    }

    // ── Payment confirmation ──────────────────────────────────────────────────

    #[test]
    fn confirm_payment_is_idempotent() {
        let service = service();
        let sale = service
            .create_sale(input(vec![line(1, "1.00")]))
            .expect("create failed");

        let first = service.confirm_payment(sale.id, true).expect("first confirm");
        let second = service
            .confirm_payment(sale.id, true)
            .expect("second confirm");

        assert!(first.payment_confirmed_by_company);
        assert!(second.payment_confirmed_by_company);
    }

    #[test]
    fn confirm_payment_can_be_reverted() {
        let service = service();
        let sale = service
            .create_sale(input(vec![line(1, "1.00")]))
            .expect("create failed");

        service.confirm_payment(sale.id, true).expect("confirm");
        let reverted = service.confirm_payment(sale.id, false).expect("revert");

        assert!(!reverted.payment_confirmed_by_company);
    }

    #[test]
    fn confirm_payment_unknown_sale_is_not_found() {
        let service = service();

        let err = service.confirm_payment(Uuid::new_v4(), true).unwrap_err();

        assert!(matches!(err, DomainError::SaleNotFound(_)));
    }

    // ── Status transitions ────────────────────────────────────────────────────

    #[test]
    fn pending_sale_can_be_cancelled_but_not_revived() {
        let service = service();
        let sale = service
            .create_sale(input(vec![line(1, "1.00")]))
            .expect("create failed");

        let cancelled = service
            .change_status(sale.id, SaleStatus::Cancelled)
            .expect("cancel failed");
        assert_eq!(cancelled.status, SaleStatus::Cancelled);

        let err = service
            .change_status(sale.id, SaleStatus::Pending)
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: SaleStatus::Cancelled,
                to: SaleStatus::Pending
            }
        ));

        // The rejected transition must not have touched the stored status.
        let current = service.get_sale(sale.id).expect("get failed");
        assert_eq!(current.status, SaleStatus::Cancelled);
    }

    #[test]
    fn sale_can_walk_the_happy_path_to_delivered() {
        let service = service();
        let sale = service
            .create_sale(input(vec![line(1, "1.00")]))
            .expect("create failed");

        let shipped = service
            .change_status(sale.id, SaleStatus::Shipped)
            .expect("ship failed");
        assert_eq!(shipped.status, SaleStatus::Shipped);

        let delivered = service
            .change_status(sale.id, SaleStatus::Delivered)
            .expect("deliver failed");
        assert_eq!(delivered.status, SaleStatus::Delivered);
    }

    #[test]
    fn change_status_unknown_sale_is_not_found() {
        let service = service();

        let err = service
            .change_status(Uuid::new_v4(), SaleStatus::Cancelled)
            .unwrap_err();

        assert!(matches!(err, DomainError::SaleNotFound(_)));
    }

    // ── Listings ──────────────────────────────────────────────────────────────

    #[test]
    fn list_filters_by_party() {
        let service = service();
        for buyer_id in [10, 10, 11] {
            let mut request = input(vec![line(1, "1.00")]);
            request.buyer_id = buyer_id;
            service.create_sale(request).expect("create failed");
        }

        let all = service
            .list_sales(SaleFilter::All, 1, 20)
            .expect("list failed");
        assert_eq!(all.total, 3);

        let buyer = service
            .list_sales(SaleFilter::Buyer(10), 1, 20)
            .expect("list failed");
        assert_eq!(buyer.total, 2);
        assert!(buyer.items.iter().all(|s| s.buyer_id == 10));

        let company = service
            .list_sales(SaleFilter::SellingCompany(20), 1, 20)
            .expect("list failed");
        assert_eq!(company.total, 3);

        let broker = service
            .list_sales(SaleFilter::Broker(99), 1, 20)
            .expect("list failed");
        assert_eq!(broker.total, 0);
    }
}
