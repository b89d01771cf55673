//! Integration tests for PlayerScraper using wiremock

use nba_player_api::{
    db::PlayerStore,
    error::{FetchError, SeedError},
    fetcher::{PlayerScraper, PlayerSource},
    seed::{self, SeedOutcome},
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PER_GAME_PAGE: &str = include_str!("fixtures/per_game.html");

async fn serve_page(mock_server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/leagues/NBA_2025_per_game.html"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}

fn scraper_for(mock_server: &MockServer) -> PlayerScraper {
    PlayerScraper::new(format!("{}/leagues/NBA_2025_per_game.html", mock_server.uri())).unwrap()
}

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, 200, PER_GAME_PAGE).await;

    let players = scraper_for(&mock_server).get_player_data().await.unwrap();

    assert_eq!(players.len(), 4);
    assert_eq!(players[0].name, "Shai Gilgeous-Alexander");
}

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let err = scraper.get_player_data().await.unwrap_err();

    match err {
        FetchError::Status { status, url } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(url, scraper.url());
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_page_without_players() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, 200, "<html><body>Maintenance</body></html>").await;

    let err = scraper_for(&mock_server).get_player_data().await.unwrap_err();

    assert!(matches!(err, FetchError::NoPlayers));
}

#[tokio::test]
async fn test_seed_from_scraped_page() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, 200, PER_GAME_PAGE).await;

    let store = PlayerStore::in_memory().await.unwrap();
    let outcome = seed::check_and_seed(&store, &scraper_for(&mock_server)).await.unwrap();

    assert_eq!(outcome, SeedOutcome::Seeded(4));
    assert_eq!(store.count_players().await.unwrap(), 4);
    assert_eq!(store.get_player_by_id(3).await.unwrap().name, "Nikola Jokić");
}

#[tokio::test]
async fn test_seed_aborts_on_fetch_failure() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, 500, "").await;

    let store = PlayerStore::in_memory().await.unwrap();
    let err = seed::check_and_seed(&store, &scraper_for(&mock_server)).await.unwrap_err();

    assert!(matches!(err, SeedError::Fetch(FetchError::Status { .. })));
    assert_eq!(store.count_players().await.unwrap(), 0);
}
