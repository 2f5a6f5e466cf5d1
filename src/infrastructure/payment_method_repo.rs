use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::PaymentMethodCatalog;
use crate::domain::sale::{PageResult, PaymentMethodView};
use crate::schema::payment_methods;

use super::models::PaymentMethodRow;

pub struct DieselPaymentMethodCatalog {
    pool: DbPool,
}

impl DieselPaymentMethodCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_view(row: PaymentMethodRow) -> PaymentMethodView {
    PaymentMethodView {
        id: row.id,
        name: row.name,
        description: row.description,
    }
}

impl PaymentMethodCatalog for DieselPaymentMethodCatalog {
    fn find_by_id(&self, id: i32) -> Result<Option<PaymentMethodView>, DomainError> {
        let mut conn = self.pool.get()?;

        let row: Option<PaymentMethodRow> = payment_methods::table
            .find(id)
            .select(PaymentMethodRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(to_view))
    }

    fn list_all(&self) -> Result<Vec<PaymentMethodView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<PaymentMethodRow> = payment_methods::table
            .select(PaymentMethodRow::as_select())
            .order(payment_methods::id.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(to_view).collect())
    }

    fn list(&self, page: i64, limit: i64) -> Result<PageResult<PaymentMethodView>, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1) * limit;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = payment_methods::table.count().get_result(conn)?;

            let rows: Vec<PaymentMethodRow> = payment_methods::table
                .select(PaymentMethodRow::as_select())
                .order(payment_methods::id.asc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(PageResult {
                items: rows.into_iter().map(to_view).collect(),
                total,
            })
        })
    }
}
