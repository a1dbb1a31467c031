use std::sync::Arc;
use rocket::{State, get, post, http::Status, serde::json::{self, Json}};
use tracing::{error, info, instrument, warn};
use votes_shared::{validate_vote_input, ResultsResponse, VoteInput, VoteResponse};
use crate::{error::ApiError, store::VoteDb};

pub struct AppState {
    pub db: Arc<dyn VoteDb>,
}

impl AppState {
    pub fn new(db: impl VoteDb + 'static) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn from_shared(db: Arc<dyn VoteDb>) -> Self {
        Self { db }
    }
}

#[get("/_healthcheck")]
pub async fn healthcheck() -> Status {
    Status::Ok
}

#[instrument(skip(state, payload), fields(voter_id))]
#[post("/votes", data = "<payload>")]
pub async fn store_vote(
    state: &State<AppState>,
    payload: Result<Json<VoteInput>, json::Error<'_>>,
) -> Result<Status, ApiError> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(e) => {
            error!("server: decode payload: {}", e);
            return Err(ApiError::Decode);
        }
    };
    tracing::Span::current().record("voter_id", input.voter_id.as_str());

    if let Err(e) = validate_vote_input(&input) {
        warn!("server: reject vote for voter ID {}: {}", input.voter_id, e);
        return Err(ApiError::InvalidInput(e.to_string()));
    }

    if let Err(e) = state.db.store(&input).await {
        error!("server: store vote {:?}: {}", input, e);
        return Err(ApiError::Internal(format!("store vote for voter ID {}", input.voter_id)));
    }

    info!("server: registered vote for voter ID {}", input.voter_id);
    Ok(Status::Ok)
}

#[instrument(skip(state))]
#[get("/votes/<voter_id>")]
pub async fn get_vote(state: &State<AppState>, voter_id: &str) -> Result<Json<VoteResponse>, ApiError> {
    match state.db.result(voter_id).await {
        Ok(vote) => Ok(Json(VoteResponse { vote })),
        Err(e) if e.is_no_vote() => {
            warn!("server: vote for voter ID does not exist: {}", voter_id);
            Err(ApiError::NoVote(e.to_string()))
        }
        Err(e) => {
            error!("server: get vote for voter ID {}: {}", voter_id, e);
            Err(ApiError::Internal(format!("get vote for voter ID {}", voter_id)))
        }
    }
}

#[instrument(skip(state))]
#[get("/results")]
pub async fn get_results(state: &State<AppState>) -> Result<Json<ResultsResponse>, ApiError> {
    state
        .db
        .results()
        .await
        .map(|results| Json(ResultsResponse { results }))
        .map_err(|e| {
            error!("server: get all vote results: {}", e);
            ApiError::Internal("get results".into())
        })
}
