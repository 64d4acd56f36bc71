use tracing::{debug, instrument};

use super::{dto::DashboardStats, repo::SpptStore};
use crate::error::AppError;

/// Runs the four aggregates concurrently; absent values default to zero.
#[instrument(skip(store))]
pub async fn get_stats(store: &dyn SpptStore) -> Result<DashboardStats, AppError> {
    let (total, paid, unpaid, owed) = tokio::try_join!(
        store.count_all(),
        store.count_by_payment_status(true),
        store.count_by_payment_status(false),
        store.sum_owed(),
    )?;

    let stats = DashboardStats {
        total_sppt: total.unwrap_or(0),
        total_sppt_lunas: paid.unwrap_or(0),
        total_sppt_belum_lunas: unpaid.unwrap_or(0),
        total_pbb_terhutang: owed.unwrap_or(0.0),
    };
    debug!(?stats, "dashboard stats computed");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemorySpptStore;

    #[tokio::test]
    async fn empty_table_yields_zeros() {
        let store = InMemorySpptStore::default();
        assert_eq!(store.count_all().await.unwrap(), None);
        assert_eq!(store.count_by_payment_status(true).await.unwrap(), None);
        assert_eq!(store.sum_owed().await.unwrap(), None);

        let stats = get_stats(&store).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                total_sppt: 0,
                total_sppt_lunas: 0,
                total_sppt_belum_lunas: 0,
                total_pbb_terhutang: 0.0,
            }
        );

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_sppt"], 0);
        assert_eq!(json["total_pbb_terhutang"], 0.0);
        assert!(json.as_object().unwrap().values().all(|v| !v.is_null()));
    }

    #[tokio::test]
    async fn counts_and_sums_records() {
        let store = InMemorySpptStore::default();
        store.push(true, 150_000.0);
        store.push(false, 275_500.5);
        store.push(false, 24_499.5);

        let stats = get_stats(&store).await.unwrap();
        assert_eq!(stats.total_sppt, 3);
        assert_eq!(stats.total_sppt_lunas, 1);
        assert_eq!(stats.total_sppt_belum_lunas, 2);
        assert!((stats.total_pbb_terhutang - 450_000.0).abs() < f64::EPSILON);
    }
}
