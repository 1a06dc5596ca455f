use crate::webserver::{middleware, state::AppState, templates};
use axum::{
    middleware::from_fn_with_state,
    response::Html,
    routing::get,
    Router,
};
use std::sync::Arc;

pub mod auth;
pub mod checkins;
pub mod leaderboard;
pub mod places;
pub mod profiles;
pub mod status;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser pages behind the session gate
    let pages = Router::new()
        .route("/", get(home_page))
        .route("/check-in", get(check_in_page))
        .route("/leaderboard", get(leaderboard_page))
        .route("/profile", get(profile_page))
        .route("/profile/:id", get(profile_page))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::session_gate,
        ));

    Router::new()
        .route("/auth", get(auth_page))
        .merge(pages)
        .nest("/api", api_routes())
        .with_state(state)
}

/// All JSON API routes
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(auth::routes())
        .merge(checkins::routes())
        .merge(places::routes())
        .merge(leaderboard::routes())
        .merge(profiles::routes())
}

/// Sign-in page handler (the only ungated page)
async fn auth_page() -> Html<String> {
    let content = templates::auth_content();
    Html(templates::base_template("Sign In", "auth", content))
}

/// Home page handler
async fn home_page() -> Html<String> {
    let content = templates::home_content();
    Html(templates::base_template("Home", "home", content))
}

/// Check-in page handler
async fn check_in_page() -> Html<String> {
    let content = templates::check_in_content();
    Html(templates::base_template("Check In", "check-in", content))
}

/// Leaderboard page handler
async fn leaderboard_page() -> Html<String> {
    let content = templates::leaderboard_content();
    Html(templates::base_template(
        "Leaderboard",
        "leaderboard",
        content,
    ))
}

/// Profile page handler
async fn profile_page() -> Html<String> {
    let content = templates::profile_content();
    Html(templates::base_template("Profile", "profile", content))
}
