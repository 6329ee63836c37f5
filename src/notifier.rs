//! Aspect-scoped change notification.
//!
//! Subscribers declare which [`Aspect`] of the [`MetricsSnapshot`] they
//! depend on. Publishing a snapshot diffs it against the previous one and
//! wakes only the subscribers whose aspect changed, each exactly once.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

use crate::{
    category::Category,
    error::{NotifyError, SubscriberFault},
    metrics::MetricsSnapshot,
};

/// The part of a snapshot a subscriber depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Aspect {
    /// Only the resolved category.
    Category,
    /// Only the orientation.
    Orientation,
    /// Any field of the snapshot.
    Full,
}

impl Aspect {
    pub fn changed<C: Category>(
        self,
        previous: &MetricsSnapshot<C>,
        next: &MetricsSnapshot<C>,
    ) -> bool {
        match self {
            Aspect::Category => previous.category() != next.category(),
            Aspect::Orientation => previous.orientation() != next.orientation(),
            Aspect::Full => previous != next,
        }
    }
}

/// Handle returned by [`Notifier::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        SubscriptionId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

type Callback<C> = Rc<dyn Fn(&MetricsSnapshot<C>) -> anyhow::Result<()>>;

#[derive(educe::Educe)]
#[educe(Debug)]
struct Subscription<C> {
    aspect: Aspect,
    #[educe(Debug(ignore))]
    callback: Callback<C>,
}

/// What a single publish did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    notified: SmallVec<[SubscriptionId; 8]>,
    category_changed: bool,
    changed: bool,
}

impl Dispatch {
    /// Subscriptions that were invoked, in subscription order.
    pub fn notified(&self) -> &[SubscriptionId] {
        &self.notified
    }

    pub fn was_notified(&self, id: SubscriptionId) -> bool {
        self.notified.contains(&id)
    }

    pub fn category_changed(&self) -> bool {
        self.category_changed
    }

    /// Whether the published snapshot differed from the previous one at all.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Resets the dispatching flag even if a callback panics.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Registry of subscriptions plus the last published snapshot.
///
/// Single-threaded: callbacks run synchronously inside
/// [`publish`](Self::publish), in subscription order. Subscriptions added by a
/// callback take effect from the next publish; subscriptions removed by a
/// callback are not invoked again, not even later in the same dispatch.
/// Panics in callbacks are not caught.
pub struct Notifier<C: Category> {
    previous: RefCell<Option<MetricsSnapshot<C>>>,
    subscriptions: RefCell<IndexMap<SubscriptionId, Subscription<C>, FxBuildHasher>>,
    dispatching: Cell<bool>,
}

impl<C: Category> std::fmt::Debug for Notifier<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("previous", &self.previous.borrow())
            .field("subscriptions", &self.subscriptions.borrow())
            .field("dispatching", &self.dispatching.get())
            .finish()
    }
}

impl<C: Category> Default for Notifier<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> Notifier<C> {
    pub fn new() -> Self {
        Self {
            previous: RefCell::new(None),
            subscriptions: RefCell::new(IndexMap::with_hasher(FxBuildHasher)),
            dispatching: Cell::new(false),
        }
    }

    /// A notifier whose first publish is diffed against `baseline`.
    pub fn with_baseline(baseline: MetricsSnapshot<C>) -> Self {
        let notifier = Self::new();
        notifier.previous.replace(Some(baseline));
        notifier
    }

    pub fn subscribe(
        &self,
        aspect: Aspect,
        f: impl Fn(&MetricsSnapshot<C>) + 'static,
    ) -> SubscriptionId {
        self.subscribe_fallible(aspect, move |snapshot| {
            f(snapshot);
            Ok(())
        })
    }

    /// Subscribe with a callback that can fail. Failures are collected into
    /// the [`NotifyError`] returned by [`publish`](Self::publish).
    pub fn subscribe_fallible(
        &self,
        aspect: Aspect,
        f: impl Fn(&MetricsSnapshot<C>) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.subscriptions.borrow_mut().insert(
            id,
            Subscription {
                aspect,
                callback: Rc::new(f),
            },
        );
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscriptions.borrow_mut().shift_remove(&id).is_some()
    }

    pub fn aspect_of(&self, id: SubscriptionId) -> Option<Aspect> {
        self.subscriptions.borrow().get(&id).map(|sub| sub.aspect)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.borrow().is_empty()
    }

    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    /// The last published snapshot.
    pub fn current(&self) -> Option<MetricsSnapshot<C>> {
        self.previous.borrow().clone()
    }

    /// Publish `next` and notify every subscriber whose aspect changed.
    ///
    /// `next` becomes the baseline for the following publish whether or not
    /// anything changed. The very first publish of a notifier without a
    /// baseline only records it.
    ///
    /// Every interested subscriber is invoked even if an earlier one fails;
    /// the failures are returned together as [`NotifyError::Subscribers`].
    pub fn publish(&self, next: MetricsSnapshot<C>) -> Result<Dispatch, NotifyError> {
        if self.dispatching.get() {
            return Err(NotifyError::Reentrant);
        }

        let previous = self.previous.replace(Some(next.clone()));
        let Some(previous) = previous else {
            tracing::trace!(category = next.category().name(), "recorded baseline snapshot");
            return Ok(Dispatch::default());
        };

        let mut dispatch = Dispatch {
            notified: SmallVec::new(),
            category_changed: Aspect::Category.changed(&previous, &next),
            changed: Aspect::Full.changed(&previous, &next),
        };
        if !dispatch.changed {
            return Ok(dispatch);
        }

        // Clone the interested callbacks out so that they can touch the
        // registry while running.
        let targets = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|(_, sub)| sub.aspect.changed(&previous, &next))
            .map(|(id, sub)| (*id, sub.aspect, sub.callback.clone()))
            .collect::<SmallVec<[_; 8]>>();

        self.dispatching.set(true);
        let _guard = DispatchGuard(&self.dispatching);

        let mut faults = Vec::new();
        for (id, aspect, callback) in targets {
            // Removed by an earlier callback of this dispatch.
            if !self.subscriptions.borrow().contains_key(&id) {
                continue;
            }
            dispatch.notified.push(id);
            if let Err(error) = (*callback)(&next) {
                tracing::warn!(?id, ?aspect, "subscriber failed: {error:#}");
                faults.push(SubscriberFault { id, aspect, error });
            }
        }

        tracing::debug!(
            notified = dispatch.notified.len(),
            failed = faults.len(),
            category_changed = dispatch.category_changed,
            "dispatched snapshot"
        );

        if faults.is_empty() {
            Ok(dispatch)
        } else {
            Err(NotifyError::Subscribers {
                notified: dispatch.notified.into_vec(),
                faults,
            })
        }
    }
}
