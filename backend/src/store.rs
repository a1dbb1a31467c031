use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use votes_shared::{ResultCount, VoteError, VoteInput};

/// PostgreSQL accepts at most 65535 bind parameters per statement and every
/// row of a batch insert binds two.
pub const MAX_BATCH_SIZE: usize = u16::MAX as usize / 2;

/// Operations allowed on votes. Implementations never log; callers decide
/// how each error is reported.
#[rocket::async_trait]
pub trait VoteDb: Send + Sync {
    /// Records `input.vote` for `input.voter_id`, replacing any earlier vote.
    async fn store(&self, input: &VoteInput) -> Result<(), VoteError>;
    /// Inserts every vote in one statement. Fails as a whole if any voter id
    /// already has a vote or appears twice in the batch.
    async fn batch_store(&self, votes: &[VoteInput]) -> Result<(), VoteError>;
    async fn result(&self, voter_id: &str) -> Result<String, VoteError>;
    /// Tally per distinct vote value, in no particular order.
    async fn results(&self) -> Result<Vec<ResultCount>, VoteError>;
}

pub(crate) fn check_batch_size(size: usize) -> Result<(), VoteError> {
    if size > MAX_BATCH_SIZE {
        return Err(VoteError::BatchTooLarge { size, max: MAX_BATCH_SIZE });
    }
    Ok(())
}

/// Vote store kept in process memory, keyed by voter id.
#[derive(Debug, Default)]
pub struct MemoryVoteDb {
    votes: Mutex<HashMap<String, String>>,
}

impl MemoryVoteDb {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self, context: &str) -> Result<MutexGuard<'_, HashMap<String, String>>, VoteError> {
        self.votes
            .lock()
            .map_err(|e| VoteError::unavailable(context, e.to_string()))
    }
}

#[rocket::async_trait]
impl VoteDb for MemoryVoteDb {
    async fn store(&self, input: &VoteInput) -> Result<(), VoteError> {
        let context = format!("store vote {} for voter id {}", input.vote, input.voter_id);
        let mut votes = self.lock(&context)?;
        votes.insert(input.voter_id.clone(), input.vote.clone());
        Ok(())
    }

    async fn batch_store(&self, batch: &[VoteInput]) -> Result<(), VoteError> {
        if batch.is_empty() {
            return Ok(());
        }
        check_batch_size(batch.len())?;

        let context = format!("store batch {} votes", batch.len());
        let mut votes = self.lock(&context)?;

        let mut seen = HashSet::with_capacity(batch.len());
        for input in batch {
            if votes.contains_key(&input.voter_id) || !seen.insert(input.voter_id.as_str()) {
                return Err(VoteError::constraint(
                    context,
                    format!("duplicate voter id {}", input.voter_id),
                ));
            }
        }

        votes.extend(batch.iter().map(|v| (v.voter_id.clone(), v.vote.clone())));
        Ok(())
    }

    async fn result(&self, voter_id: &str) -> Result<String, VoteError> {
        let votes = self.lock(&format!("get result for voter id {}", voter_id))?;
        votes
            .get(voter_id)
            .cloned()
            .ok_or_else(|| VoteError::no_vote(voter_id))
    }

    async fn results(&self) -> Result<Vec<ResultCount>, VoteError> {
        let votes = self.lock("retrieve voting results")?;
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for vote in votes.values() {
            *counts.entry(vote.as_str()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(result, count)| ResultCount::new(result, count))
            .collect())
    }
}
