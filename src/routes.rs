// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{auth, dashboard, quiz},
    state::AppState,
    utils::session::session_middleware,
};

/// Assembles the main application router.
///
/// * Public routes: landing page, topic list, register, login, logout.
/// * Session-protected routes: dashboard, score page, quizzes.
/// * Applies request tracing and injects the shared state.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(dashboard::home))
        .route("/health", get(dashboard::health))
        .route("/topics", get(dashboard::list_topics))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout))
        // Checks the session itself so a stale session can still be cleared
        .route("/unregister", get(auth::unregister).post(auth::unregister));

    let protected_routes = Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/display_score", get(dashboard::display_score))
        .route("/quiz/{topic}", get(quiz::get_quiz).post(quiz::submit_quiz))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
