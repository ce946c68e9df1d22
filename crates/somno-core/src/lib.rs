//! somno-core
//!
//! Pure domain types shared by every Somno crate: patient demographics,
//! survey steps, questionnaire results, the submission record and the
//! submitter seam. No I/O.

pub mod error;
pub mod models;
pub mod submit;
