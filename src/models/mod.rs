use serde::{Serialize, Deserialize};

/// Per-game season line for a single player, as scraped from the stats source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub age: Option<i64>,
    pub games_played: Option<i64>,
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
}

impl Player {
    /// Player with only the required fields set
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            team: None,
            position: None,
            age: None,
            games_played: None,
            points: None,
            rebounds: None,
            assists: None,
        }
    }
}
