use rocket::http::Status;
use rocket::response::Responder;
use thiserror::Error;
use votes_shared::VoteError;
use crate::config::ConfigError;

/// Errors returned to HTTP clients. 500 bodies only ever name the operation;
/// details belong in the log.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("decode JSON payload")]
    Decode,
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NoVote(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Decode => Status::BadRequest,
            ApiError::InvalidInput(_) => Status::BadRequest,
            ApiError::NoVote(_) => Status::BadRequest,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();

        rocket::Response::build_from(self.to_string().respond_to(req)?)
            .status(status)
            .ok()
    }
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("connect to postgres db: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("create table: {0}")]
    Schema(#[from] VoteError),
    #[error("launch server: {0}")]
    Launch(#[from] Box<rocket::Error>),
}
