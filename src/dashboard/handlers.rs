use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{dto::DashboardStats, services};
use crate::{auth::extractors::CurrentUser, error::AppError, state::AppState};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(get_dashboard_stats))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = services::get_stats(state.sppt.as_ref()).await?;
    Ok(Json(stats))
}
