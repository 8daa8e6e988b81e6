pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod feed;
pub mod live;
pub mod queries;
pub mod routes;
pub mod store;
pub use shared::{models::*, error::*};

use rocket::{catchers, routes, Build, Rocket};

use crate::{
    catchers::{bad_request, internal_error, not_found, unprocessable},
    cors::CORS,
    routes::{all_options, cast_vote, get_count, get_tally, register_participant, tally_stream, AppState},
};

/// Mounts the API on a fresh Rocket instance.
pub fn build(state: AppState) -> Rocket<Build> {
    let cors = CORS::new(state.config.allowed_origin_prefix.clone());

    rocket::build()
        .attach(cors)
        .manage(state)
        .mount(
            "/api",
            routes![
                register_participant,
                cast_vote,
                get_tally,
                get_count,
                tally_stream,
                all_options
            ],
        )
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
}
