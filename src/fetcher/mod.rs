//! One-shot scrape of season per-game stats used to seed an empty store.
//!
//! The source page is basketball-reference's league per-game table. Cells are
//! matched by their `data-stat` attribute rather than by column position, and
//! both the current and the older attribute names are accepted.

use std::collections::HashMap;
use std::future::Future;

use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::FetchError;
use crate::models::Player;

pub const DEFAULT_SOURCE_URL: &str =
    "https://www.basketball-reference.com/leagues/NBA_2025_per_game.html";

const USER_AGENT: &str = concat!("nba_player_api/", env!("CARGO_PKG_VERSION"));

/// Summary row the source appends to some tables
const LEAGUE_AVERAGE: &str = "League Average";

// Accepted `data-stat` names per field, newest first
const NAME_STATS: &[&str] = &["name_display", "player"];
const TEAM_STATS: &[&str] = &["team_name_abbr", "team_id"];
const POSITION_STATS: &[&str] = &["pos"];
const AGE_STATS: &[&str] = &["age"];
const GAMES_STATS: &[&str] = &["games", "g"];
const POINTS_STATS: &[&str] = &["pts_per_g"];
const REBOUNDS_STATS: &[&str] = &["trb_per_g"];
const ASSISTS_STATS: &[&str] = &["ast_per_g"];

macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

/// Anything that can produce the initial player list
pub trait PlayerSource {
    fn get_player_data(&self) -> impl Future<Output = Result<Vec<Player>, FetchError>> + Send;
}

/// HTTP scraper for the per-game stats page
#[derive(Debug, Clone)]
pub struct PlayerScraper {
    client: Client,
    url: String,
}

impl PlayerScraper {
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PlayerSource for PlayerScraper {
    async fn get_player_data(&self) -> Result<Vec<Player>, FetchError> {
        tracing::info!("Fetching player data from {}", self.url());

        let response = self.client.get(self.url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: self.url().to_string(),
            });
        }

        let body = response.text().await?;
        let players = parse_players(&body)?;

        tracing::info!("Parsed {} players from source", players.len());
        Ok(players)
    }
}

/// Extract players from a per-game stats page.
///
/// Ids are assigned sequentially from 1 in table order, after header and
/// summary rows are dropped.
pub fn parse_players(html: &str) -> Result<Vec<Player>, FetchError> {
    let parser = PageParser::new();

    let document = Html::parse_document(html);
    let mut players = parser.extract(&document);

    // The source sometimes ships secondary tables inside HTML comments
    if players.is_empty() {
        for block in parser.comment.captures_iter(html) {
            let fragment = Html::parse_fragment(&block[1]);
            players = parser.extract(&fragment);
            if !players.is_empty() {
                tracing::debug!("Player table found inside a comment block");
                break;
            }
        }
    }

    if players.is_empty() {
        return Err(FetchError::NoPlayers);
    }

    Ok(players)
}

struct PageParser {
    table: Selector,
    row: Selector,
    cell: Selector,
    comment: Regex,
}

impl PageParser {
    fn new() -> Self {
        Self {
            table: parse_selector!("table#per_game_stats"),
            row: parse_selector!("tbody > tr"),
            cell: parse_selector!("th, td"),
            comment: Regex::new(r"(?s)<!--(.*?)-->").expect("Invalid comment pattern"),
        }
    }

    fn extract(&self, document: &Html) -> Vec<Player> {
        let Some(table) = document.select(&self.table).next() else {
            return Vec::new();
        };

        table
            .select(&self.row)
            .filter(|row| !row.value().classes().any(|class| class == "thead"))
            .filter_map(|row| self.parse_row(row))
            .enumerate()
            .map(|(index, mut player)| {
                player.id = index as i64 + 1;
                player
            })
            .collect()
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Option<Player> {
        let cells: HashMap<&str, String> = row
            .select(&self.cell)
            .filter_map(|cell| {
                let stat = cell.value().attr("data-stat")?;
                let text = cell.text().collect::<String>().trim().to_string();
                Some((stat, text))
            })
            .collect();

        let stat = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| cells.get(*key))
                .filter(|value| !value.is_empty())
                .cloned()
        };
        let number = |keys: &[&str]| stat(keys).and_then(|value| value.parse::<f64>().ok());
        let count = |keys: &[&str]| stat(keys).and_then(|value| value.parse::<i64>().ok());

        let name = stat(NAME_STATS)?;
        if name == LEAGUE_AVERAGE {
            return None;
        }

        Some(Player {
            id: 0,
            name,
            team: stat(TEAM_STATS),
            position: stat(POSITION_STATS),
            age: count(AGE_STATS),
            games_played: count(GAMES_STATS),
            points: number(POINTS_STATS),
            rebounds: number(REBOUNDS_STATS),
            assists: number(ASSISTS_STATS),
        })
    }
}
