use thiserror::Error;

/// Failures surfaced by a vote store.
///
/// `context` names the operation (and the voter id or vote value where one
/// applies); `detail` is the driver message and is meant for logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("vote: voter id {voter_id} has no votes")]
    NoVoteForVoter { voter_id: String },
    #[error("vote: {context}: constraint violation: {detail}")]
    ConstraintViolation { context: String, detail: String },
    #[error("vote: {context}: store unavailable: {detail}")]
    StoreUnavailable { context: String, detail: String },
    #[error("vote: {context}: {detail}")]
    Backend { context: String, detail: String },
    #[error("vote: store batch of {size} votes exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },
    #[error("vote: create \"votes\" table: {0}")]
    Schema(String),
}

impl VoteError {
    pub fn no_vote(voter_id: impl Into<String>) -> Self {
        Self::NoVoteForVoter { voter_id: voter_id.into() }
    }

    pub fn unavailable(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            context: context.into(),
            detail: detail.into(),
        }
    }

    pub fn constraint(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            context: context.into(),
            detail: detail.into(),
        }
    }

    pub fn backend(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Backend {
            context: context.into(),
            detail: detail.into(),
        }
    }

    /// True for the client-input condition of a voter that never voted.
    pub fn is_no_vote(&self) -> bool {
        matches!(self, Self::NoVoteForVoter { .. })
    }
}

pub type Result<T> = std::result::Result<T, VoteError>;
