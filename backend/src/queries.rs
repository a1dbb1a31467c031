use sqlx::{PgPool, Postgres, QueryBuilder};
use votes_shared::{ResultCount, VoteError, VoteInput};
use crate::store::{check_batch_size, VoteDb};

/// Maps a driver error onto the store taxonomy, keeping the driver message as
/// detail for the logs.
pub(crate) fn classify(context: impl Into<String>, err: sqlx::Error) -> VoteError {
    let context = context.into();
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            VoteError::constraint(context, db_err.message())
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => VoteError::unavailable(context, err.to_string()),
        _ => VoteError::backend(context, err.to_string()),
    }
}

/// Votes persisted in the `votes` table of a PostgreSQL database.
#[derive(Debug, Clone)]
pub struct PgVoteDb {
    pool: PgPool,
}

impl PgVoteDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[rocket::async_trait]
impl VoteDb for PgVoteDb {
    async fn store(&self, input: &VoteInput) -> Result<(), VoteError> {
        let context = || format!("store vote {} for voter id {}", input.vote, input.voter_id);

        let inserted = sqlx::query("INSERT INTO votes (id, vote) VALUES ($1, $2)")
            .bind(&input.voter_id)
            .bind(&input.vote)
            .execute(&self.pool)
            .await;

        match inserted {
            Ok(_) => return Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {}
            Err(e) => return Err(classify(context(), e)),
        }

        // Not atomic with the insert: concurrent stores for one voter id both
        // land here and the last update to commit wins.
        sqlx::query("UPDATE votes SET vote = $1 WHERE id = $2")
            .bind(&input.vote)
            .bind(&input.voter_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(context(), e))?;

        Ok(())
    }

    async fn batch_store(&self, votes: &[VoteInput]) -> Result<(), VoteError> {
        if votes.is_empty() {
            return Ok(());
        }
        check_batch_size(votes.len())?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO votes (id, vote) ");
        builder.push_values(votes, |mut row, vote| {
            row.push_bind(&vote.voter_id).push_bind(&vote.vote);
        });

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| classify(format!("store batch {} votes", votes.len()), e))?;

        Ok(())
    }

    async fn result(&self, voter_id: &str) -> Result<String, VoteError> {
        sqlx::query_scalar::<_, String>("SELECT vote FROM votes WHERE id = $1")
            .bind(voter_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(format!("get result for voter id {}", voter_id), e))?
            .ok_or_else(|| VoteError::no_vote(voter_id))
    }

    async fn results(&self) -> Result<Vec<ResultCount>, VoteError> {
        sqlx::query_as::<_, ResultCount>(
            "SELECT vote AS result, COUNT(id) AS count FROM votes GROUP BY vote",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify("retrieve voting results", e))
    }
}
