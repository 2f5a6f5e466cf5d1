pub mod payment_methods;
pub mod sales;

use serde::Deserialize;
use utoipa::ToSchema;

/// Shared pagination query parameters.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PageParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

impl PageParams {
    /// Clamps to sane bounds: page ≥ 1, 1 ≤ limit ≤ 100.
    pub fn normalized(&self) -> (i64, i64) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }
}
