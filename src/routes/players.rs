use axum::{
    extract::{Path, State},
    response::Json,
};
use crate::db::PlayerStore;
use crate::error::ApiError;
use crate::models::Player;

// GET /player - List all players
pub async fn get_players(
    State(store): State<PlayerStore>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = store
        .get_all_players()
        .await
        .inspect_err(|err| tracing::error!("Failed to get players: {}", err))?;

    Ok(Json(players))
}

// GET /player/{id} - Get player by ID
pub async fn get_player_by_id(
    State(store): State<PlayerStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player_id = parse_player_id(&raw_id)?;

    let player = store
        .get_player_by_id(player_id)
        .await
        .inspect_err(|err| tracing::error!("Failed to get player by ID: {}", err))?;

    Ok(Json(player))
}

// GET /random - Get a random player
pub async fn get_random_player(
    State(store): State<PlayerStore>,
) -> Result<Json<Player>, ApiError> {
    let player = store
        .get_random_player()
        .await
        .inspect_err(|err| tracing::error!("Failed to get random player: {}", err))?;

    Ok(Json(player))
}

fn parse_player_id(raw_id: &str) -> Result<i64, ApiError> {
    match raw_id.parse::<i64>() {
        Ok(id) => Ok(id),
        Err(_) => {
            tracing::warn!("Bad request, invalid ID: {}", raw_id);
            Err(ApiError::BadRequest(raw_id.to_string()))
        }
    }
}
