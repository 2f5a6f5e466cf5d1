use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::status::SaleStatus;

/// One requested line of a sale, as submitted by the buyer.
///
/// `product_name` is snapshotted onto the stored line so later product
/// renames do not alter historical sales.
#[derive(Debug, Clone)]
pub struct SaleLineRequest {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// A validated line with its subtotal computed, ready to persist.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
}

/// Creation request for a complete sale aggregate.
#[derive(Debug, Clone)]
pub struct CreateSaleInput {
    pub payment_method_id: i32,
    pub buyer_id: i64,
    pub selling_company_id: Option<i64>,
    pub broker_id: Option<i64>,
    pub lines: Vec<SaleLineRequest>,
}

/// A fully assembled aggregate handed to the repository for the single
/// atomic insert of header plus line items. Storage assigns the row ids.
#[derive(Debug, Clone)]
pub struct NewSaleAggregate {
    pub correlative: String,
    pub payment_method_id: i32,
    pub buyer_id: i64,
    pub selling_company_id: Option<i64>,
    pub broker_id: Option<i64>,
    pub total: BigDecimal,
    pub lines: Vec<PricedLine>,
}

#[derive(Debug, Clone)]
pub struct SaleLineView {
    pub id: Uuid,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct SaleView {
    pub id: Uuid,
    pub correlative: String,
    pub status: SaleStatus,
    pub total: BigDecimal,
    pub payment_confirmed_by_company: bool,
    pub payment_method_id: i32,
    pub payment_method_name: String,
    pub buyer_id: i64,
    pub selling_company_id: Option<i64>,
    pub broker_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Line items in input order. Listings omit them.
    pub lines: Vec<SaleLineView>,
}

#[derive(Debug, Clone)]
pub struct PaymentMethodView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Which party a sale listing is filtered by.
#[derive(Debug, Clone, Copy)]
pub enum SaleFilter {
    All,
    Buyer(i64),
    SellingCompany(i64),
    Broker(i64),
}

#[derive(Debug, Clone)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: i64,
}
