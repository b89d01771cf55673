use crate::db::PlayerStore;
use crate::error::SeedError;
use crate::fetcher::PlayerSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Store already had this many rows; the source was not contacted
    AlreadySeeded(i64),
    /// Store was empty and this many players were inserted
    Seeded(usize),
}

/// Populate the store from `source` if, and only if, it is empty.
pub async fn check_and_seed<S: PlayerSource>(
    store: &PlayerStore,
    source: &S,
) -> Result<SeedOutcome, SeedError> {
    let player_count = store.count_players().await?;
    if player_count > 0 {
        tracing::info!("Database already holds {} players, skipping seed", player_count);
        return Ok(SeedOutcome::AlreadySeeded(player_count));
    }

    tracing::info!("Adding players to database");

    let players = source.get_player_data().await?;
    store.add_all_players(&players).await?;

    tracing::info!("Seeded database with {} players", players.len());
    Ok(SeedOutcome::Seeded(players.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::Player;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        players: Vec<Player>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(players: Vec<Player>) -> Self {
            Self { players, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PlayerSource for StubSource {
        async fn get_player_data(&self) -> Result<Vec<Player>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.players.clone())
        }
    }

    struct FailingSource;

    impl PlayerSource for FailingSource {
        async fn get_player_data(&self) -> Result<Vec<Player>, FetchError> {
            Err(FetchError::NoPlayers)
        }
    }

    fn players() -> Vec<Player> {
        vec![
            Player::new(1, "Anthony Edwards"),
            Player::new(2, "Luka Dončić"),
            Player::new(3, "Victor Wembanyama"),
        ]
    }

    #[tokio::test]
    async fn seeds_empty_store() {
        let store = PlayerStore::in_memory().await.unwrap();
        let source = StubSource::new(players());

        let outcome = check_and_seed(&store, &source).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Seeded(3));
        assert_eq!(store.count_players().await.unwrap(), 3);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn populated_store_never_calls_source() {
        let store = PlayerStore::in_memory().await.unwrap();
        store.add_all_players(&[Player::new(30, "Stephen Curry")]).await.unwrap();
        let source = StubSource::new(players());

        let outcome = check_and_seed(&store, &source).await.unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadySeeded(1));
        assert_eq!(source.calls(), 0);
        assert_eq!(store.count_players().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let store = PlayerStore::in_memory().await.unwrap();
        let source = StubSource::new(players());

        check_and_seed(&store, &source).await.unwrap();
        let outcome = check_and_seed(&store, &source).await.unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadySeeded(3));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_is_reported() {
        let store = PlayerStore::in_memory().await.unwrap();

        let err = check_and_seed(&store, &FailingSource).await.unwrap_err();

        assert!(matches!(err, SeedError::Fetch(FetchError::NoPlayers)));
        assert_eq!(store.count_players().await.unwrap(), 0);
    }
}
