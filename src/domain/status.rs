use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Lifecycle state of a sale.
///
/// The set of states is closed and transitions are checked against
/// [`SaleStatus::successors`]; a status change request that is not in the
/// table is rejected instead of overwriting the column with an arbitrary
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl SaleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "PENDING",
            SaleStatus::Shipped => "SHIPPED",
            SaleStatus::Delivered => "DELIVERED",
            SaleStatus::Cancelled => "CANCELLED",
        }
    }

    /// Valid next states from this one.
    ///
    /// PENDING → SHIPPED | CANCELLED, SHIPPED → DELIVERED, and DELIVERED /
    /// CANCELLED are terminal.
    pub const fn successors(&self) -> &'static [SaleStatus] {
        match self {
            SaleStatus::Pending => &[SaleStatus::Shipped, SaleStatus::Cancelled],
            SaleStatus::Shipped => &[SaleStatus::Delivered],
            SaleStatus::Delivered | SaleStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: SaleStatus) -> bool {
        self.successors().contains(&next)
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, SaleStatus::Delivered | SaleStatus::Cancelled)
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(SaleStatus::Pending),
            "SHIPPED" => Ok(SaleStatus::Shipped),
            "DELIVERED" => Ok(SaleStatus::Delivered),
            "CANCELLED" => Ok(SaleStatus::Cancelled),
            other => Err(DomainError::Validation(format!(
                "unknown sale status: {}",
                other
            ))),
        }
    }
}
