pub mod patient;
pub mod questionnaire;
pub mod record;
pub mod step;
