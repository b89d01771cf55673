use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use crate::error::StoreError;
use crate::models::Player;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Handle to the player table. Cheap to clone, shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PlayerStore {
    pool: SqlitePool,
}

impl PlayerStore {
    /// Open (creating if missing) the database at `database_url` and apply migrations
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database. Pinned to one connection that never expires,
    /// otherwise each pooled connection would see its own empty database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn count_players(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM players"#
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn get_all_players(&self) -> Result<Vec<Player>, StoreError> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players ORDER BY id"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    pub async fn get_player_by_id(&self, id: i64) -> Result<Player, StoreError> {
        if id < 0 {
            return Err(StoreError::InvalidId(id));
        }

        sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players WHERE id = ?"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    pub async fn get_random_player(&self) -> Result<Player, StoreError> {
        sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players ORDER BY RANDOM() LIMIT 1"#
        )
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::Empty)
    }

    /// Insert the whole batch in one transaction. Any failing row rolls back the batch.
    pub async fn add_all_players(&self, players: &[Player]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for player in players {
            sqlx::query(
                r#"INSERT INTO players
                       (id, name, team, position, age, games_played, points, rebounds, assists)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#
            )
            .bind(player.id)
            .bind(&player.name)
            .bind(player.team.as_deref())
            .bind(player.position.as_deref())
            .bind(player.age)
            .bind(player.games_played)
            .bind(player.points)
            .bind(player.rebounds)
            .bind(player.assists)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
