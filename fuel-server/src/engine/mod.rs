//! The corridor search pipeline: dataset filtering, corridor admission,
//! ranking, bucketing, and sequential detour confirmation.

mod bucket;
mod candidate;
mod config;
mod corridor;
mod dataset;
mod events;
mod rank;
mod search;

pub use bucket::{Bucket, bucketize, interval_km, max_visible_km};
pub use candidate::{Candidate, ConfirmedStation, DetourResult};
pub use config::EngineConfig;
pub use corridor::corridor_filter;
pub use dataset::filter_dataset;
pub use events::{NullObserver, RejectReason, SearchEvent, SearchObserver};
pub use rank::{compare_candidates, pre_rank, sort_confirmed};
pub use search::{
    CancelToken, Engine, NoMatch, RouteProvider, SearchError, SearchRequest, SearchResult,
    SearchStats,
};
