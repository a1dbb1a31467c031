use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteInput {
    pub voter_id: String,
    pub vote: String,
}

impl VoteInput {
    pub fn new(voter_id: impl Into<String>, vote: impl Into<String>) -> Self {
        Self {
            voter_id: voter_id.into(),
            vote: vote.into(),
        }
    }
}

/// A vote value paired with the number of voters currently holding it.
#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultCount {
    pub result: String,
    pub count: i64,
}

impl ResultCount {
    pub fn new(result: impl Into<String>, count: i64) -> Self {
        Self {
            result: result.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteResponse {
    pub vote: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsResponse {
    pub results: Vec<ResultCount>,
}
