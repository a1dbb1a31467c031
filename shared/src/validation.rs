use crate::models::VoteInput;

/// Width of both `VARCHAR` columns in the votes table.
pub const MAX_FIELD_LENGTH: usize = 255;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("voter id exceeds maximum length of {MAX_FIELD_LENGTH}")]
    VoterIdTooLong,
    #[error("vote exceeds maximum length of {MAX_FIELD_LENGTH}")]
    VoteTooLong,
}

pub fn validate_vote_input(input: &VoteInput) -> Result<(), ValidationError> {
    if input.voter_id.chars().count() > MAX_FIELD_LENGTH { return Err(ValidationError::VoterIdTooLong); }
    if input.vote.chars().count() > MAX_FIELD_LENGTH { return Err(ValidationError::VoteTooLong); }
    Ok(())
}
