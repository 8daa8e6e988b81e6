use std::sync::Arc;
use rocket::{State, Shutdown, get, post, http::Status, serde::json::Json};
use rocket::response::stream::{Event, EventStream};
use rocket::tokio::select;
use serde::Serialize;
use tracing::{debug, error, info, instrument};
use shared::models::*;
use shared::validation::validate_nickname;

use crate::{
    config::AppConfig,
    error::ApiError,
    feed::TallyFeed,
    store::VoteStore,
};

pub struct AppState {
    pub store: Arc<dyn VoteStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn VoteStore>, config: AppConfig) -> Self {
        Self { store, config }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountView {
    pub filter: String,
    pub count: u64,
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[instrument(skip(state, request))]
#[post("/participants", format = "json", data = "<request>")]
pub async fn register_participant(
    state: &State<AppState>,
    request: Json<RegisterRequest>,
) -> Result<Json<Participant>, ApiError> {
    let nickname = validate_nickname(&request.nickname)?;

    let participant = state.store.register(nickname).await.map_err(|e| {
        error!("Failed to register participant: {}", e);
        ApiError::from(e)
    })?;

    info!(participant = %participant.id, "👋 {} joined", participant.nickname);
    Ok(Json(participant))
}

#[instrument(skip(state, request), fields(team))]
#[post("/votes", format = "json", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    request: Json<CastVoteRequest>,
) -> Result<Json<VoteReceipt>, ApiError> {
    let vote = NewVote::from(request.into_inner());
    tracing::Span::current().record("team", vote.team.as_str());

    match state.store.append(vote).await {
        Ok(vote) => {
            debug!(vote = %vote.id, "Vote stored");
            Ok(Json(VoteReceipt::from(&vote)))
        }
        Err(e) => {
            error!("Failed to store vote: {}", e);
            Err(e.into())
        }
    }
}

#[get("/tally")]
pub fn get_tally(state: &State<AppState>) -> Json<TallyView> {
    Json(state.store.current().into())
}

#[get("/counts/<filter>")]
pub fn get_count(
    state: &State<AppState>,
    filter: Result<VoteFilter, UnknownTeam>,
) -> Result<Json<CountView>, ApiError> {
    let filter = filter.map_err(|UnknownTeam(name)| ApiError::UnknownTeam(name))?;
    Ok(Json(CountView {
        filter: filter.to_string(),
        count: state.store.current().count(filter),
    }))
}

/// Server-sent tally updates. The feed, and with it the three count
/// subscriptions, is dropped as soon as the client goes away or the server
/// shuts down.
#[get("/tally/stream")]
pub fn tally_stream(state: &State<AppState>, mut end: Shutdown) -> EventStream![] {
    let mut feed = TallyFeed::open(&*state.store);
    info!(subscribers = state.store.subscriber_count(), "📡 Tally stream opened");

    let stream = EventStream! {
        loop {
            let snapshot = select! {
                snapshot = feed.next() => match snapshot {
                    Some(snapshot) => snapshot,
                    None => break,
                },
                _ = &mut end => break,
            };
            yield Event::json(&TallyView::from(snapshot));
        }
    };

    stream.heartbeat(state.config.heartbeat)
}
