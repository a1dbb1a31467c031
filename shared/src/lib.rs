pub mod error;
pub mod models;
pub mod validation;

pub use error::{Result, VoteError};
pub use models::*;
pub use validation::*;
