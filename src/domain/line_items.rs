use bigdecimal::{BigDecimal, Zero};

use super::errors::DomainError;
use super::sale::{PricedLine, SaleLineRequest};

/// Validates the requested lines and prices them.
///
/// Returns the priced lines in input order together with the exact total.
/// All arithmetic is `BigDecimal`, so the sum is exact and independent of
/// summation order.
pub fn accumulate_lines(
    requests: &[SaleLineRequest],
) -> Result<(Vec<PricedLine>, BigDecimal), DomainError> {
    if requests.is_empty() {
        return Err(DomainError::Validation(
            "a sale requires at least one line item".to_string(),
        ));
    }

    let mut lines = Vec::with_capacity(requests.len());
    let mut total = BigDecimal::zero();

    for (index, request) in requests.iter().enumerate() {
        if request.quantity < 1 {
            return Err(DomainError::Validation(format!(
                "line {}: quantity must be at least 1, got {}",
                index, request.quantity
            )));
        }
        if request.unit_price < BigDecimal::zero() {
            return Err(DomainError::Validation(format!(
                "line {}: unit_price must not be negative, got {}",
                index, request.unit_price
            )));
        }

        let subtotal = &request.unit_price * BigDecimal::from(request.quantity);
        total = total + &subtotal;

        lines.push(PricedLine {
            product_id: request.product_id,
            product_name: request.product_name.clone(),
            quantity: request.quantity,
            unit_price: request.unit_price.clone(),
            subtotal,
        });
    }

    Ok((lines, total))
}
