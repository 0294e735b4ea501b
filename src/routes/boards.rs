use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::BoardRecord;
use crate::repo::UpdateOutcome;
use crate::routes::validate_board_name;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddBoardRequest {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoardRequest {
    /// Token from the last read of this board
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct PurgeBoardsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PurgeBoardsResponse {
    pub purged: usize,
}

/// List all boards of an account
pub async fn list_boards(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<BoardRecord>>> {
    let boards = state.repo.list_boards(&account_id).await?;
    Ok(Json(boards))
}

/// Add a board to an account
pub async fn add_board(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(payload): Json<AddBoardRequest>,
) -> Result<Json<BoardRecord>> {
    validate_board_name(&payload.name)?;

    let board = state
        .repo
        .add_board(&account_id, &payload.name, &payload.color)
        .await?;

    Ok(Json(board))
}

/// Update a board's name and color
///
/// The request must carry the `updatedAt` value the client last saw.
/// Returns 404 if the board does not exist and 409 Conflict if someone else
/// changed it in the meantime.
pub async fn update_board(
    State(state): State<AppState>,
    Path((account_id, board_id)): Path<(String, String)>,
    Json(payload): Json<UpdateBoardRequest>,
) -> Result<Json<BoardRecord>> {
    validate_board_name(&payload.name)?;

    let outcome = state
        .repo
        .update_board(
            &account_id,
            &board_id,
            payload.updated_at,
            &payload.name,
            &payload.color,
        )
        .await?;

    match outcome {
        UpdateOutcome::Updated(board) => Ok(Json(board)),
        UpdateOutcome::NotFound => Err(AppError::BoardNotFound),
        UpdateOutcome::Conflict => Err(AppError::StaleBoard),
    }
}

/// Delete several boards at once
///
/// Unknown ids are ignored; the response says how many boards were removed.
pub async fn purge_boards(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(payload): Json<PurgeBoardsRequest>,
) -> Result<Json<PurgeBoardsResponse>> {
    let purged = state.repo.purge_boards(&account_id, payload.ids).await?;
    Ok(Json(PurgeBoardsResponse { purged }))
}
