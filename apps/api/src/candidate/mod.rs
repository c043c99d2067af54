//! Candidate profiles: multi-source aggregation, fingerprinted storage and chat.

pub mod context;
pub mod fingerprint;
pub mod handlers;
pub mod profile;
pub mod store;
