//! Query orchestration for Clima
//!
//! Keyed, cached, dependent asynchronous fetches: per-identity state
//! machines with staleness windows, refresh coalescing and
//! discard-stale-response semantics.

pub mod key;
pub mod table;

pub use key::{digest, CoordKey};
pub use table::{FetchPlan, QueryStatus, QueryTable};
