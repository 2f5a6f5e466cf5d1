use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::sale::{
    CreateSaleInput, PageResult, SaleFilter, SaleLineRequest, SaleLineView, SaleView,
};
use crate::domain::status::SaleStatus;
use crate::errors::AppError;
use crate::AppSaleService;

use super::PageParams;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleLineRequest {
    pub product_id: i64,
    /// Name snapshot stored on the line; later product renames do not alter
    /// this sale.
    pub product_name: String,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "10.50"
    pub unit_price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub payment_method_id: i32,
    pub buyer_id: i64,
    pub selling_company_id: Option<i64>,
    pub broker_id: Option<i64>,
    pub lines: Vec<CreateSaleLineRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmPaymentRequest {
    /// true if the company has received the payment.
    pub confirmed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleLineResponse {
    pub id: Uuid,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: String,
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleResponse {
    pub id: Uuid,
    pub correlative: String,
    pub status: String,
    pub total: String,
    pub payment_confirmed_by_company: bool,
    pub payment_method_id: i32,
    pub payment_method_name: String,
    pub buyer_id: i64,
    pub selling_company_id: Option<i64>,
    pub broker_id: Option<i64>,
    pub created_at: String,
    pub lines: Vec<SaleLineResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListSalesResponse {
    pub items: Vec<SaleResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl From<SaleLineView> for SaleLineResponse {
    fn from(line: SaleLineView) -> Self {
        SaleLineResponse {
            id: line.id,
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
            subtotal: line.subtotal.to_string(),
        }
    }
}

impl From<SaleView> for SaleResponse {
    fn from(sale: SaleView) -> Self {
        SaleResponse {
            id: sale.id,
            correlative: sale.correlative,
            status: sale.status.to_string(),
            total: sale.total.to_string(),
            payment_confirmed_by_company: sale.payment_confirmed_by_company,
            payment_method_id: sale.payment_method_id,
            payment_method_name: sale.payment_method_name,
            buyer_id: sale.buyer_id,
            selling_company_id: sale.selling_company_id,
            broker_id: sale.broker_id,
            created_at: sale.created_at.to_rfc3339(),
            lines: sale.lines.into_iter().map(SaleLineResponse::from).collect(),
        }
    }
}

fn to_domain_input(body: CreateSaleRequest) -> Result<CreateSaleInput, AppError> {
    let lines = body
        .lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let unit_price = BigDecimal::from_str(&line.unit_price).map_err(|e| {
                AppError::Validation(format!(
                    "line {}: invalid unit_price '{}': {}",
                    index, line.unit_price, e
                ))
            })?;
            Ok(SaleLineRequest {
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                unit_price,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(CreateSaleInput {
        payment_method_id: body.payment_method_id,
        buyer_id: body.buyer_id,
        selling_company_id: body.selling_company_id,
        broker_id: body.broker_id,
        lines,
    })
}

fn page_response(result: PageResult<SaleView>, page: i64, limit: i64) -> ListSalesResponse {
    ListSalesResponse {
        items: result.items.into_iter().map(SaleResponse::from).collect(),
        total: result.total,
        page,
        limit,
    }
}

async fn list_with_filter(
    service: web::Data<AppSaleService>,
    filter: SaleFilter,
    params: PageParams,
) -> Result<HttpResponse, AppError> {
    let (page, limit) = params.normalized();
    let service = service.into_inner();

    let result = web::block(move || service.list_sales(filter, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(page_response(result, page, limit)))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /sales
///
/// Creates a sale together with its line items. The header and all lines are
/// written inside a single database transaction, so a concurrent reader never
/// observes a partial sale.
#[utoipa::path(
    post,
    path = "/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale created", body = SaleResponse),
        (status = 400, description = "Invalid line items"),
        (status = 404, description = "Payment method not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn create_sale(
    service: web::Data<AppSaleService>,
    body: web::Json<CreateSaleRequest>,
) -> Result<HttpResponse, AppError> {
    let input = to_domain_input(body.into_inner())?;
    let service = service.into_inner();

    let sale = web::block(move || service.create_sale(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(SaleResponse::from(sale)))
}

/// GET /sales/{id}
#[utoipa::path(
    get,
    path = "/sales/{id}",
    params(("id" = Uuid, Path, description = "Sale UUID")),
    responses(
        (status = 200, description = "Sale found", body = SaleResponse),
        (status = 404, description = "Sale not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn get_sale(
    service: web::Data<AppSaleService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let sale_id = path.into_inner();
    let service = service.into_inner();

    let sale = web::block(move || service.get_sale(sale_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(SaleResponse::from(sale)))
}

/// GET /sales/correlative/{correlative}
///
/// Lookup by the human-readable reference, used by payment confirmation
/// flows.
#[utoipa::path(
    get,
    path = "/sales/correlative/{correlative}",
    params(("correlative" = String, Path, description = "Sale reference, e.g. VEN-3F2A9C10B4D7")),
    responses(
        (status = 200, description = "Sale found", body = SaleResponse),
        (status = 404, description = "Sale not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn get_sale_by_correlative(
    service: web::Data<AppSaleService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let correlative = path.into_inner();
    let service = service.into_inner();

    let sale = web::block(move || service.get_by_correlative(&correlative))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(SaleResponse::from(sale)))
}

/// PUT /sales/{id}/payment-confirmation
///
/// Marks or reverts the company's payment confirmation. Idempotent.
#[utoipa::path(
    put,
    path = "/sales/{id}/payment-confirmation",
    params(("id" = Uuid, Path, description = "Sale UUID")),
    request_body = ConfirmPaymentRequest,
    responses(
        (status = 200, description = "Confirmation updated", body = SaleResponse),
        (status = 404, description = "Sale not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn confirm_payment(
    service: web::Data<AppSaleService>,
    path: web::Path<Uuid>,
    body: web::Json<ConfirmPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let sale_id = path.into_inner();
    let confirmed = body.into_inner().confirmed;
    let service = service.into_inner();

    let sale = web::block(move || service.confirm_payment(sale_id, confirmed))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(SaleResponse::from(sale)))
}

/// PUT /sales/{id}/status/{new_status}
///
/// Moves the sale to `new_status` if the transition table allows it from the
/// current state; otherwise responds 409 without touching the sale.
#[utoipa::path(
    put,
    path = "/sales/{id}/status/{new_status}",
    params(
        ("id" = Uuid, Path, description = "Sale UUID"),
        ("new_status" = String, Path, description = "One of PENDING, SHIPPED, DELIVERED, CANCELLED"),
    ),
    responses(
        (status = 200, description = "Status updated", body = SaleResponse),
        (status = 400, description = "Unknown status token"),
        (status = 404, description = "Sale not found"),
        (status = 409, description = "Transition not allowed from the current status"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn change_status(
    service: web::Data<AppSaleService>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse, AppError> {
    let (sale_id, status_token) = path.into_inner();
    let new_status: SaleStatus = status_token.parse().map_err(AppError::from)?;
    let service = service.into_inner();

    let sale = web::block(move || service.change_status(sale_id, new_status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(SaleResponse::from(sale)))
}

/// GET /sales
#[utoipa::path(
    get,
    path = "/sales",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated sales, newest first", body = ListSalesResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn list_sales(
    service: web::Data<AppSaleService>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    list_with_filter(service, SaleFilter::All, query.into_inner()).await
}

/// GET /sales/buyer/{buyer_id}
#[utoipa::path(
    get,
    path = "/sales/buyer/{buyer_id}",
    params(
        ("buyer_id" = i64, Path, description = "Buyer identifier"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "The buyer's sales, newest first", body = ListSalesResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn list_sales_by_buyer(
    service: web::Data<AppSaleService>,
    path: web::Path<i64>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    list_with_filter(
        service,
        SaleFilter::Buyer(path.into_inner()),
        query.into_inner(),
    )
    .await
}

/// GET /sales/company/{company_id}
#[utoipa::path(
    get,
    path = "/sales/company/{company_id}",
    params(
        ("company_id" = i64, Path, description = "Selling-company identifier"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "The company's sales, newest first", body = ListSalesResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn list_sales_by_company(
    service: web::Data<AppSaleService>,
    path: web::Path<i64>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    list_with_filter(
        service,
        SaleFilter::SellingCompany(path.into_inner()),
        query.into_inner(),
    )
    .await
}

/// GET /sales/broker/{broker_id}
#[utoipa::path(
    get,
    path = "/sales/broker/{broker_id}",
    params(
        ("broker_id" = i64, Path, description = "Broker identifier"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "The broker's sales, newest first", body = ListSalesResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sales"
)]
pub async fn list_sales_by_broker(
    service: web::Data<AppSaleService>,
    path: web::Path<i64>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    list_with_filter(
        service,
        SaleFilter::Broker(path.into_inner()),
        query.into_inner(),
    )
    .await
}
