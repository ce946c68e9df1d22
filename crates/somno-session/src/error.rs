use thiserror::Error;

use somno_core::error::ValidationError;
use somno_core::models::step::Step;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("cannot submit {attempted} while the session is on {current}")]
    InvalidState { current: Step, attempted: Step },
}
