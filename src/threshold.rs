//! Threshold tables: the classification policy mapping a dimension to a
//! [`Category`].

use std::fmt;

use crate::{category::Category, error::ConfigError};

/// Threshold of the final table entry that matches every dimension,
/// including negative and NaN ones.
pub const CATCH_ALL: f64 = -1.0;

/// One row of a [`ThresholdTable`]: the smallest dimension `category` applies
/// to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint<C> {
    pub category: C,
    pub min: f64,
}

impl<C> Breakpoint<C> {
    pub fn is_catch_all(&self) -> bool {
        self.min < 0.0
    }

    fn matches(&self, dimension: f64) -> bool {
        self.is_catch_all() || self.min <= dimension
    }
}

/// An immutable, validated list of breakpoints ordered from the largest
/// category to the smallest.
///
/// Thresholds strictly decrease down the table and the final entry is the
/// catch-all: any dimension below every threshold classifies into it.
#[derive(Clone, PartialEq)]
pub struct ThresholdTable<C> {
    entries: Vec<Breakpoint<C>>,
}

impl<C: Category> ThresholdTable<C> {
    /// Build a table from `(category, min)` pairs listed largest category
    /// first.
    ///
    /// Fails if the list is empty, a category repeats, thresholds do not
    /// strictly decrease, the categories are not listed in descending rank,
    /// a threshold is NaN, or a threshold other than the last one is
    /// negative. The final entry may be [`CATCH_ALL`].
    pub fn new(entries: impl IntoIterator<Item = (C, f64)>) -> Result<Self, ConfigError> {
        let entries = entries
            .into_iter()
            .map(|(category, min)| Breakpoint { category, min })
            .collect::<Vec<_>>();
        Self::validate(&entries)?;
        Ok(Self { entries })
    }

    /// Tables declared by the crate itself; validated by the unit tests of
    /// each category.
    pub(crate) fn from_static(entries: &[(C, f64)]) -> Self {
        let entries = entries
            .iter()
            .map(|&(category, min)| Breakpoint { category, min })
            .collect::<Vec<_>>();
        debug_assert!(Self::validate(&entries).is_ok());
        Self { entries }
    }

    fn validate(entries: &[Breakpoint<C>]) -> Result<(), ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        let last = entries.len() - 1;
        for (i, entry) in entries.iter().enumerate() {
            let category = entry.category.name();
            if entry.min.is_nan() {
                return Err(ConfigError::InvalidThreshold { category });
            }
            if entry.min < 0.0 && i != last {
                return Err(ConfigError::NegativeThreshold {
                    category,
                    threshold: entry.min,
                });
            }
            if entries[..i].iter().any(|e| e.category == entry.category) {
                return Err(ConfigError::DuplicateCategory { category });
            }
            if i == 0 {
                continue;
            }

            let previous = &entries[i - 1];
            if entry.min >= previous.min {
                return Err(ConfigError::NotDescending {
                    category,
                    threshold: entry.min,
                    previous: previous.category.name(),
                    previous_threshold: previous.min,
                });
            }
            if entry.category > previous.category {
                return Err(ConfigError::RankOrder {
                    category,
                    previous: previous.category.name(),
                });
            }
        }
        Ok(())
    }

    /// The category a dimension falls into.
    ///
    /// Returns the first entry whose threshold is `<= dimension`, or the last
    /// entry when none is.
    pub fn category_for(&self, dimension: f64) -> C {
        self.entries
            .iter()
            .find(|entry| entry.matches(dimension))
            .unwrap_or(self.lowest())
            .category
    }

    /// The threshold configured for `category`, if the table lists it.
    pub fn threshold_of(&self, category: C) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.min)
    }

    /// The catch-all entry.
    pub fn lowest(&self) -> &Breakpoint<C> {
        // `validate` rejects empty tables.
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[Breakpoint<C>] {
        &self.entries
    }

    pub fn categories(&self) -> impl Iterator<Item = C> + '_ {
        self.entries.iter().map(|entry| entry.category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Category> Default for ThresholdTable<C> {
    fn default() -> Self {
        C::default_thresholds()
    }
}

impl<C: Category> fmt::Debug for ThresholdTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for entry in &self.entries {
            if entry.is_catch_all() {
                map.entry(&entry.category.name(), &"..");
            } else {
                map.entry(&entry.category.name(), &entry.min);
            }
        }
        map.finish()
    }
}

#[cfg(feature = "serde")]
impl<C> serde::Serialize for ThresholdTable<C>
where
    C: Category + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|entry| (entry.category, entry.min)))
    }
}

/// Tables deserialize from a `{category: threshold}` map in any key order;
/// entries are sorted by rank before validation.
#[cfg(feature = "serde")]
impl<'de, C> serde::Deserialize<'de> for ThresholdTable<C>
where
    C: Category + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = std::collections::BTreeMap::<C, f64>::deserialize(deserializer)?;
        Self::new(raw.into_iter().rev()).map_err(serde::de::Error::custom)
    }
}
