//! Raw viewport metrics reported by the host, and the immutable snapshots
//! built from them.

use peniko::kurbo::{Insets, Size};

use crate::{categorizer::Categorizer, category::Category};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape when the viewport is wider than it is tall.
    pub fn from_size(size: Size) -> Self {
        if size.width > size.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }
}

/// Metrics that do not take part in classification but are still part of a
/// snapshot. Subscribers on [`Aspect::Full`](crate::Aspect::Full) see
/// changes to them, category subscribers do not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SecondaryMetrics {
    /// User font scaling, 1.0 being the platform default.
    pub text_scale: f64,
    /// Space obscured by system UI such as notches and status bars.
    pub padding: Insets,
    /// Space obscured by transient UI such as an on-screen keyboard.
    pub view_insets: Insets,
}

impl Default for SecondaryMetrics {
    fn default() -> Self {
        Self {
            text_scale: 1.0,
            padding: Insets::ZERO,
            view_insets: Insets::ZERO,
        }
    }
}

/// One update from the host environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawMetrics {
    /// Logical viewport size.
    pub size: Size,
    /// Physical pixels per logical pixel.
    pub scale_factor: f64,
    pub orientation: Orientation,
    pub secondary: SecondaryMetrics,
}

impl RawMetrics {
    /// Metrics for a logical `size`, with the orientation derived from it.
    pub fn new(size: Size, scale_factor: f64) -> Self {
        Self {
            size,
            scale_factor,
            orientation: Orientation::from_size(size),
            secondary: SecondaryMetrics::default(),
        }
    }

    /// Metrics for a size in physical pixels.
    pub fn from_physical(physical: Size, scale_factor: f64) -> Self {
        let logical = if scale_factor.is_finite() && scale_factor > 0.0 {
            physical / scale_factor
        } else {
            physical
        };
        Self::new(logical, scale_factor)
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_secondary(mut self, secondary: SecondaryMetrics) -> Self {
        self.secondary = secondary;
        self
    }

    pub fn physical_size(&self) -> Size {
        self.size * self.scale_factor
    }
}

/// The category and the raw metrics that produced it.
///
/// Snapshots compare structurally; two snapshots built from equal inputs with
/// the same categorizer are equal.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsSnapshot<C> {
    category: C,
    dimension: f64,
    size: Size,
    orientation: Orientation,
    scale_factor: f64,
    secondary: SecondaryMetrics,
}

impl<C: Category> MetricsSnapshot<C> {
    pub fn build(raw: &RawMetrics, categorizer: &Categorizer<C>) -> Self {
        let dimension = categorizer.dimension_of(raw.size);
        Self {
            category: categorizer.categorize(dimension),
            dimension,
            size: raw.size,
            orientation: raw.orientation,
            scale_factor: raw.scale_factor,
            secondary: raw.secondary,
        }
    }

    pub fn category(&self) -> C {
        self.category
    }

    /// The value that was classified, in logical pixels.
    pub fn dimension(&self) -> f64 {
        self.dimension
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn secondary(&self) -> &SecondaryMetrics {
        &self.secondary
    }

    pub fn raw(&self) -> RawMetrics {
        RawMetrics {
            size: self.size,
            scale_factor: self.scale_factor,
            orientation: self.orientation,
            secondary: self.secondary,
        }
    }
}
