//! somno-monday
//!
//! Persists completed surveys as items on a monday.com board via the
//! GraphQL `create_item` mutation. Blocking, one request per submission.

pub mod client;
pub mod columns;
pub mod response;
