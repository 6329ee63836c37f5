use peniko::kurbo::Size;

use crate::{category::Category, threshold::ThresholdTable};

/// Which side of the viewport feeds classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DimensionSource {
    #[default]
    Width,
    Height,
    /// The smaller side, so that rotating a device does not change its class.
    ShortestSide,
    LongestSide,
}

impl DimensionSource {
    pub fn dimension_of(self, size: Size) -> f64 {
        match self {
            DimensionSource::Width => size.width,
            DimensionSource::Height => size.height,
            DimensionSource::ShortestSide => size.width.min(size.height),
            DimensionSource::LongestSide => size.width.max(size.height),
        }
    }
}

/// Maps viewport sizes to categories through a [`ThresholdTable`].
#[derive(Clone, Debug)]
pub struct Categorizer<C: Category> {
    table: ThresholdTable<C>,
    source: DimensionSource,
}

impl<C: Category> Default for Categorizer<C> {
    fn default() -> Self {
        Self::new(ThresholdTable::default())
    }
}

impl<C: Category> Categorizer<C> {
    pub fn new(table: ThresholdTable<C>) -> Self {
        Self {
            table,
            source: DimensionSource::default(),
        }
    }

    pub fn with_source(mut self, source: DimensionSource) -> Self {
        self.source = source;
        self
    }

    pub fn table(&self) -> &ThresholdTable<C> {
        &self.table
    }

    pub fn source(&self) -> DimensionSource {
        self.source
    }

    /// Replace the table wholesale, returning the previous one.
    pub fn set_table(&mut self, table: ThresholdTable<C>) -> ThresholdTable<C> {
        std::mem::replace(&mut self.table, table)
    }

    pub fn categorize(&self, dimension: f64) -> C {
        self.table.category_for(dimension)
    }

    /// The dimension this categorizer reads from `size`.
    pub fn dimension_of(&self, size: Size) -> f64 {
        self.source.dimension_of(size)
    }

    pub fn categorize_size(&self, size: Size) -> C {
        self.categorize(self.dimension_of(size))
    }
}
