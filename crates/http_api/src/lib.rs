mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{Router, middleware as axum_middleware, routing::post};

pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/save_data", post(handlers::save_data))
        .route("/get_data", post(handlers::get_data))
        .route("/clear_data", post(handlers::clear_data))
        .route("/summary", post(handlers::summary))
        .route("/replay", post(handlers::replay))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_csrf,
        ));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .with_state(state)
}
