use std::cell::{Cell, RefCell};

use crate::{
    categorizer::Categorizer,
    category::Category,
    error::NotifyError,
    metrics::{MetricsSnapshot, RawMetrics},
    notifier::{Aspect, Dispatch, Notifier, SubscriptionId},
    resolver::ValueResolver,
    threshold::ThresholdTable,
};

/// The entry point a host framework drives.
///
/// Owns the categorizer, the last raw metrics and the notifier. The host
/// calls [`update`](Self::update) whenever the viewport changes; consumers
/// subscribe to the aspects they render from and resolve their values against
/// [`category`](Self::category).
///
/// ```rust,ignore
/// let cx = ResponsiveContext::<ScreenSize>::with_default_thresholds(
///     RawMetrics::new(Size::new(1280.0, 800.0), 2.0),
/// );
/// let columns = ValueResolver::new(
///     CategoryValueMap::builder()
///         .value(ScreenSize::Xs, 1)
///         .value(ScreenSize::Lg, 3)
///         .build()?,
/// );
/// cx.subscribe(Aspect::Category, move |snapshot| {
///     relayout(*columns.resolve(snapshot.category()));
/// });
/// cx.update(RawMetrics::new(Size::new(600.0, 800.0), 2.0))?;
/// ```
pub struct ResponsiveContext<C: Category> {
    categorizer: RefCell<Categorizer<C>>,
    raw: Cell<RawMetrics>,
    notifier: Notifier<C>,
}

impl<C: Category> ResponsiveContext<C> {
    /// Classify `initial` and use it as the baseline. Nothing is notified for
    /// the initial metrics.
    pub fn new(categorizer: Categorizer<C>, initial: RawMetrics) -> Self {
        warn_on_scale_factor(&initial);
        let baseline = MetricsSnapshot::build(&initial, &categorizer);
        tracing::debug!(
            category = baseline.category().name(),
            dimension = baseline.dimension(),
            "initial breakpoint"
        );
        Self {
            categorizer: RefCell::new(categorizer),
            raw: Cell::new(initial),
            notifier: Notifier::with_baseline(baseline),
        }
    }

    pub fn with_default_thresholds(initial: RawMetrics) -> Self {
        Self::new(Categorizer::default(), initial)
    }

    /// Handle a new report from the host and notify affected subscribers.
    pub fn update(&self, raw: RawMetrics) -> Result<Dispatch, NotifyError> {
        if self.notifier.is_dispatching() {
            return Err(NotifyError::Reentrant);
        }
        warn_on_scale_factor(&raw);
        self.raw.set(raw);
        self.republish()
    }

    /// Swap the threshold table and re-classify the current metrics against
    /// it. Returns the dispatch for the re-classified snapshot.
    pub fn set_thresholds(&self, table: ThresholdTable<C>) -> Result<Dispatch, NotifyError> {
        if self.notifier.is_dispatching() {
            return Err(NotifyError::Reentrant);
        }
        tracing::debug!(thresholds = ?table, "replacing threshold table");
        self.categorizer.borrow_mut().set_table(table);
        self.republish()
    }

    fn republish(&self) -> Result<Dispatch, NotifyError> {
        let next = MetricsSnapshot::build(&self.raw.get(), &self.categorizer.borrow());
        let previous = self.category();
        if previous != next.category() {
            tracing::debug!(
                from = previous.name(),
                to = next.category().name(),
                dimension = next.dimension(),
                "breakpoint changed"
            );
        }
        self.notifier.publish(next)
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot<C> {
        self.notifier
            .current()
            .unwrap_or_else(|| MetricsSnapshot::build(&self.raw.get(), &self.categorizer.borrow()))
    }

    pub fn category(&self) -> C {
        self.snapshot().category()
    }

    pub fn raw_metrics(&self) -> RawMetrics {
        self.raw.get()
    }

    pub fn thresholds(&self) -> ThresholdTable<C> {
        self.categorizer.borrow().table().clone()
    }

    /// Resolve the value `resolver` holds for the current category.
    pub fn resolve<'a, V>(&self, resolver: &'a ValueResolver<C, V>) -> &'a V {
        resolver.resolve(self.category())
    }

    pub fn subscribe(
        &self,
        aspect: Aspect,
        f: impl Fn(&MetricsSnapshot<C>) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(aspect, f)
    }

    pub fn subscribe_fallible(
        &self,
        aspect: Aspect,
        f: impl Fn(&MetricsSnapshot<C>) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe_fallible(aspect, f)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn notifier(&self) -> &Notifier<C> {
        &self.notifier
    }
}

fn warn_on_scale_factor(raw: &RawMetrics) {
    if !(raw.scale_factor.is_finite() && raw.scale_factor > 0.0) {
        tracing::warn!(
            scale_factor = raw.scale_factor,
            "host reported an invalid scale factor"
        );
    }
}
