//! Search progress events.
//!
//! The selection loop emits one event per meaningful decision so callers can
//! trace why a station was kept or dropped without the engine knowing about
//! any particular sink.

use std::sync::Arc;

use crate::domain::Station;

/// Why a candidate was passed over.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// The detour's first leg exceeds the usable range.
    OutOfRange { leg1_km: f64, usable_range_km: f64 },
    /// The routing provider returned non-finite or negative leg distances.
    BrokenDetour,
    /// The extra distance exceeds the caller's detour budget.
    OverDetourBudget { extra_km: f64, budget_km: f64 },
    /// The with-stop route could not be computed.
    ProviderFailure { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    DetourRequested {
        station: Arc<Station>,
        bucket: usize,
    },
    CandidateRejected {
        station: Arc<Station>,
        bucket: usize,
        reason: RejectReason,
    },
    CandidateConfirmed {
        station: Arc<Station>,
        bucket: usize,
        extra_km: f64,
    },
    BucketResolved {
        bucket: usize,
        confirmed: usize,
        tried: usize,
    },
}

/// Receives events as the search runs. All methods default to no-ops so
/// implementors only override what they care about.
pub trait SearchObserver {
    fn on_event(&mut self, _event: SearchEvent) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}

impl SearchObserver for Vec<SearchEvent> {
    fn on_event(&mut self, event: SearchEvent) {
        self.push(event);
    }
}
