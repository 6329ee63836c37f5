//! # Floem Responsive
//!
//! Breakpoint resolution for responsive layouts: classify a viewport
//! dimension into a size category, pick the value a use-site declared for that
//! category (falling back when it declared none), and notify consumers only
//! when the part of the viewport metrics they depend on changes.
//!
//! ## Example
//! ```rust
//! use floem_responsive::prelude::*;
//! use floem_responsive::kurbo::Size;
//!
//! let cx = ResponsiveContext::<ScreenSize>::with_default_thresholds(
//!     RawMetrics::new(Size::new(1280.0, 800.0), 2.0),
//! );
//! assert_eq!(cx.category(), ScreenSize::Xl);
//!
//! let columns = ValueResolver::new(
//!     CategoryValueMap::builder()
//!         .value(ScreenSize::Xs, 1)
//!         .values(range(ScreenSize::Md..=ScreenSize::Lg), 2)
//!         .build()
//!         .unwrap(),
//! );
//! // `Xl` has no value of its own and falls back to the closest smaller one.
//! assert_eq!(*cx.resolve(&columns), 2);
//! ```
//!
//! ## Categories
//!
//! A [`Category`] is a field-less enum declared smallest first. Four systems
//! ship with the crate: [`ScreenSize`] (the six-step width grid),
//! [`DeviceScreenType`], [`SizeClass`] and [`RefinedSize`]. Each has a default
//! [`ThresholdTable`]; any table can be supplied instead, in code or from
//! configuration with the `serde` feature.
//!
//! ## Resolution
//!
//! A [`CategoryValueMap`] need not have a value for every category. Lookups
//! try the exact category first, then the closest smaller category that has a
//! value, and finally the first value in declaration order. A
//! [`ValueResolver`] adds a single-slot cache in front of this.
//!
//! ## Notification
//!
//! Subscribers on [`Aspect::Category`] only hear about category changes;
//! subscribers on [`Aspect::Full`] hear about any change to the
//! [`MetricsSnapshot`], such as text scale or insets.
//!
//! Everything here is single-threaded and synchronous.

pub mod categorizer;
pub mod category;
pub mod context;
pub mod error;
pub mod metrics;
pub mod notifier;
pub mod resolver;
pub mod sizes;
pub mod threshold;
pub mod value_map;

pub use peniko::kurbo;

pub use categorizer::{Categorizer, DimensionSource};
pub use category::{Category, CategorySet, range};
pub use context::ResponsiveContext;
pub use error::{ConfigError, NotifyError, ResolveError, SubscriberFault};
pub use metrics::{MetricsSnapshot, Orientation, RawMetrics, SecondaryMetrics};
pub use notifier::{Aspect, Dispatch, Notifier, SubscriptionId};
pub use resolver::{CacheStats, ValueResolver};
pub use sizes::{DeviceScreenType, RefinedSize, ScreenSize, SizeClass};
pub use threshold::{Breakpoint, CATCH_ALL, ThresholdTable};
pub use value_map::{CategoryValueMap, CategoryValueMapBuilder, resolve};

pub mod prelude {
    pub use crate::{
        Aspect, Category, CategorySet, CategoryValueMap, DeviceScreenType, MetricsSnapshot,
        RawMetrics, RefinedSize, ResponsiveContext, ScreenSize, SizeClass, ThresholdTable,
        ValueResolver, range,
    };
}
