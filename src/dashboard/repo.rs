use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;

/// Aggregate reads over the `sppt` table. `None` means the database returned no value.
#[async_trait]
pub trait SpptStore: Send + Sync {
    async fn count_all(&self) -> Result<Option<i64>, AppError>;
    async fn count_by_payment_status(&self, paid: bool) -> Result<Option<i64>, AppError>;
    async fn sum_owed(&self) -> Result<Option<f64>, AppError>;
}

#[derive(Clone)]
pub struct PgSpptStore {
    db: PgPool,
}

impl PgSpptStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SpptStore for PgSpptStore {
    async fn count_all(&self) -> Result<Option<i64>, AppError> {
        let count = sqlx::query_scalar::<_, Option<i64>>("SELECT COUNT(*) FROM sppt")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    async fn count_by_payment_status(&self, paid: bool) -> Result<Option<i64>, AppError> {
        let count = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT COUNT(*) FROM sppt WHERE status_pembayaran_sppt = $1",
        )
        .bind(paid)
        .fetch_one(&self.db)
        .await?;
        Ok(count)
    }

    async fn sum_owed(&self) -> Result<Option<f64>, AppError> {
        // SUM over an empty table is NULL.
        let sum = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT SUM(pbb_terhutang_sppt)::FLOAT8 FROM sppt",
        )
        .fetch_one(&self.db)
        .await?;
        Ok(sum)
    }
}
