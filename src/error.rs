use thiserror::Error;

use crate::notifier::{Aspect, SubscriptionId};

/// A responsive configuration that can never classify or resolve correctly.
///
/// Returned at construction time only. These describe bugs in the breakpoint
/// setup, so callers are expected to propagate them rather than recover.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("threshold table has no entries")]
    EmptyTable,
    #[error("category `{category}` appears more than once in the threshold table")]
    DuplicateCategory { category: &'static str },
    #[error(
        "thresholds must strictly decrease: `{category}` ({threshold}) follows `{previous}` ({previous_threshold})"
    )]
    NotDescending {
        category: &'static str,
        threshold: f64,
        previous: &'static str,
        previous_threshold: f64,
    },
    #[error("categories must be listed largest first: `{category}` is ranked above `{previous}`")]
    RankOrder {
        category: &'static str,
        previous: &'static str,
    },
    #[error(
        "threshold for `{category}` is negative ({threshold}); only the last entry may be the catch-all"
    )]
    NegativeThreshold {
        category: &'static str,
        threshold: f64,
    },
    #[error("threshold for `{category}` is not a number")]
    InvalidThreshold { category: &'static str },
    #[error("value map has no value for any category (declared: [{declared}])")]
    EmptyValueMap { declared: String },
}

/// Resolution found no value at all.
///
/// Value maps reject this shape on construction, so hitting it means the
/// map invariant was broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no value to resolve `{category}` from (map contents: [{contents}])")]
    Exhausted {
        category: &'static str,
        contents: String,
    },
}

/// A subscriber callback that returned an error during dispatch.
#[derive(Debug, Error)]
#[error("subscriber {id:?} ({aspect:?}) failed: {error:#}")]
pub struct SubscriberFault {
    pub id: SubscriptionId,
    pub aspect: Aspect,
    pub error: anyhow::Error,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    /// At least one subscriber failed. Every other interested subscriber was
    /// still notified; `notified` lists all of them, failed ones included.
    #[error("{} of {} notified subscriber(s) failed", .faults.len(), .notified.len())]
    Subscribers {
        notified: Vec<SubscriptionId>,
        faults: Vec<SubscriberFault>,
    },
    #[error("snapshot published from inside a subscriber callback")]
    Reentrant,
}
