use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures from the player store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("no player with id {0}")]
    NotFound(i64),

    #[error("invalid player id {0}, ids are non-negative")]
    InvalidId(i64),

    #[error("player table is empty")]
    Empty,
}

/// Failures while scraping the external player source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source returned HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("no player rows found in source page")]
    NoPlayers,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),
}

/// Anything that aborts the process before or while serving
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open database: {0}")]
    Store(#[from] StoreError),

    #[error("failed to build player fetcher: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to seed database: {0}")]
    Seed(#[from] SeedError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handler failure. Renders as a bare status code, details stay in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid player id {0:?}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // Missing ids are reported as server errors, same as any other store failure
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_server_error() {
        let err = ApiError::from(StoreError::NotFound(999_999));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_renders_bare_status() {
        let response = ApiError::BadRequest("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("content-type").is_none());
    }
}
