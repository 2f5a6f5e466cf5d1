use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::sale::PaymentMethodView;
use crate::errors::AppError;
use crate::AppPaymentMethodService;

use super::PageParams;

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListPaymentMethodsResponse {
    pub items: Vec<PaymentMethodResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl From<PaymentMethodView> for PaymentMethodResponse {
    fn from(method: PaymentMethodView) -> Self {
        PaymentMethodResponse {
            id: method.id,
            name: method.name,
            description: method.description,
        }
    }
}

/// GET /payment-methods
#[utoipa::path(
    get,
    path = "/payment-methods",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated payment methods", body = ListPaymentMethodsResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payment-methods"
)]
pub async fn list_payment_methods(
    service: web::Data<AppPaymentMethodService>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let (page, limit) = query.normalized();
    let service = service.into_inner();

    let result = web::block(move || service.list(page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListPaymentMethodsResponse {
        items: result
            .items
            .into_iter()
            .map(PaymentMethodResponse::from)
            .collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /payment-methods/all
#[utoipa::path(
    get,
    path = "/payment-methods/all",
    responses(
        (status = 200, description = "Every catalogued payment method", body = [PaymentMethodResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payment-methods"
)]
pub async fn list_all_payment_methods(
    service: web::Data<AppPaymentMethodService>,
) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();

    let methods = web::block(move || service.list_all())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(
        methods
            .into_iter()
            .map(PaymentMethodResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /payment-methods/{id}
#[utoipa::path(
    get,
    path = "/payment-methods/{id}",
    params(("id" = i32, Path, description = "Payment-method identifier")),
    responses(
        (status = 200, description = "Payment method found", body = PaymentMethodResponse),
        (status = 404, description = "Payment method not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payment-methods"
)]
pub async fn get_payment_method(
    service: web::Data<AppPaymentMethodService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let service = service.into_inner();

    let method = web::block(move || service.get_by_id(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PaymentMethodResponse::from(method)))
}
