use serde::Serialize;

/// Flat summary of the `sppt` table shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_sppt: i64,
    pub total_sppt_lunas: i64,
    pub total_sppt_belum_lunas: i64,
    pub total_pbb_terhutang: f64,
}
