use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::{payment_methods, sale_line_items, sales};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = payment_methods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentMethodRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = sales)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SaleRow {
    pub id: Uuid,
    pub correlative: String,
    pub status: String,
    pub total: BigDecimal,
    pub payment_confirmed_by_company: bool,
    pub payment_method_id: i32,
    pub buyer_id: i64,
    pub selling_company_id: Option<i64>,
    pub broker_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sales)]
pub struct NewSaleRow {
    pub id: Uuid,
    pub correlative: String,
    pub status: String,
    pub total: BigDecimal,
    pub payment_confirmed_by_company: bool,
    pub payment_method_id: i32,
    pub buyer_id: i64,
    pub selling_company_id: Option<i64>,
    pub broker_id: Option<i64>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = sale_line_items)]
#[diesel(belongs_to(SaleRow, foreign_key = sale_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SaleLineItemRow {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
    pub line_number: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sale_line_items)]
pub struct NewSaleLineItemRow {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
    pub line_number: i32,
}
