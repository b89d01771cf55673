use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::db::PlayerStore;
use crate::middleware::{cors_headers, log_request};
use crate::routes;

/// Build the HTTP router over `store`.
///
/// Middleware runs outermost first: tracing, request log, then CORS headers
/// when `enable_cors` is set.
pub fn router(store: PlayerStore, enable_cors: bool) -> Router {
    let app = Router::new()
        .route("/hello", get(routes::health::hello))
        .route("/player", get(routes::players::get_players))
        .route("/player/{id}", get(routes::players::get_player_by_id))
        .route("/random", get(routes::players::get_random_player));

    let app = if enable_cors {
        app.layer(middleware::from_fn(cors_headers))
    } else {
        app
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(log_request)),
    )
    .with_state(store)
}
