use sqlx::PgPool;
use votes_shared::VoteError;

const CREATE_VOTES_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS votes (id VARCHAR(255) NOT NULL UNIQUE, vote VARCHAR(255) NOT NULL)";

// Two sessions creating the table at once can both pass the IF NOT EXISTS
// check; the loser reports one of these instead.
const UNIQUE_VIOLATION: &str = "23505";
const DUPLICATE_TABLE: &str = "42P07";

/// Creates the `votes` table unless it already exists.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), VoteError> {
    match sqlx::query(CREATE_VOTES_TABLE).execute(pool).await {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db_err))
            if matches!(db_err.code().as_deref(), Some(UNIQUE_VIOLATION | DUPLICATE_TABLE)) =>
        {
            Ok(())
        }
        Err(e) => Err(VoteError::Schema(e.to_string())),
    }
}
