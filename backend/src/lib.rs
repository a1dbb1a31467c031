pub mod catchers;
pub mod config;
pub mod error;
pub mod postgres;
pub mod queries;
pub mod routes;
pub mod schema;
pub mod store;

pub use queries::PgVoteDb;
pub use routes::AppState;
pub use store::{MemoryVoteDb, VoteDb};

use rocket::{catchers, figment::Figment, routes, Build, Rocket};

/// Builds the server with every route and catcher registered up front.
pub fn build_rocket(figment: Figment, state: AppState) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(state)
        .mount(
            "/",
            routes![
                routes::healthcheck,
                routes::store_vote,
                routes::get_vote,
                routes::get_results
            ],
        )
        .register(
            "/",
            catchers![
                catchers::bad_request,
                catchers::not_found,
                catchers::unprocessable,
                catchers::internal_error
            ],
        )
}
