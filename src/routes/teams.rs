use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{CreateTeam, NewTeam, Team};

// GET /api/teams - List all teams
pub async fn list_teams(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = db::list_teams(&pool).await?;

    Ok(Json(teams))
}

// POST /api/teams - Create a team from {"name": "..."}
pub async fn create_team(
    State(pool): State<SqlitePool>,
    payload: Result<Json<CreateTeam>, JsonRejection>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let Json(body) = payload?;
    let new_team = NewTeam::try_from(body).map_err(ApiError::Validation)?;

    let team = db::create_team(&pool, &new_team).await?;
    tracing::info!(team_id = team.id, name = %team.name, "team created");

    Ok((StatusCode::CREATED, Json(team)))
}

// Any other method on /api/teams
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
