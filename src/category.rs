//! Size categories and sets of categories.
//!
//! A [`Category`] is a closed, ranked enumeration. Rank is the declaration
//! order of the enum, so a derived `Ord` gives "smaller screen" < "larger
//! screen". A [`CategorySet`] is a set of categories of one kind, used to
//! apply a single value to several breakpoints at once.

use std::{
    fmt::Debug,
    hash::Hash,
    marker::PhantomData,
    ops::{BitOr, Bound, RangeBounds},
};

use bitflags::bitflags;
use strum::IntoEnumIterator;

use crate::threshold::ThresholdTable;

/// The most categories a single [`Category`] type may declare.
pub const MAX_CATEGORIES: u32 = u32::BITS;

/// A ranked size classification.
///
/// Implemented by field-less enums declared from the smallest category to the
/// largest. The derived `Ord` is the rank.
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
///          strum::EnumIter, strum::IntoStaticStr)]
/// enum Panel { Compact, Regular, Expanded }
///
/// impl Category for Panel {
///     fn default_thresholds() -> ThresholdTable<Self> {
///         ThresholdTable::new([
///             (Panel::Expanded, 840.0),
///             (Panel::Regular, 600.0),
///             (Panel::Compact, CATCH_ALL),
///         ])
///         .expect("valid table")
///     }
/// }
/// ```
pub trait Category:
    Copy + Eq + Ord + Hash + Debug + IntoEnumIterator + Into<&'static str> + 'static
{
    /// The threshold table used when the caller does not supply one.
    fn default_thresholds() -> ThresholdTable<Self>;

    /// Position of this category in declaration order, starting at 0.
    fn rank(self) -> u32 {
        Self::iter().take_while(|c| *c != self).count() as u32
    }

    /// Stable, human readable name used in diagnostics and config files.
    fn name(self) -> &'static str {
        self.into()
    }

    /// Number of categories this type declares.
    fn count() -> u32 {
        Self::iter().count() as u32
    }
}

bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct RankFlags: u32 {
        const _ = !0;
    }
}

impl RankFlags {
    /// `None` for ranks past [`MAX_CATEGORIES`], which no set can hold.
    fn of_rank(rank: u32) -> Option<Self> {
        1u32.checked_shl(rank).map(RankFlags::from_bits_retain)
    }

    /// Every rank in `lo..=hi`.
    fn span(lo: u32, hi: u32) -> Self {
        if lo > hi || lo >= MAX_CATEGORIES {
            return RankFlags::empty();
        }
        let hi = hi.min(MAX_CATEGORIES - 1);
        let width = hi - lo + 1;
        let bits = if width == MAX_CATEGORIES {
            !0
        } else {
            ((1u32 << width) - 1) << lo
        };
        RankFlags::from_bits_retain(bits)
    }
}

/// A set of categories of one [`Category`] type.
#[must_use]
pub struct CategorySet<C> {
    flags: RankFlags,
    ty: PhantomData<C>,
}

impl<C> Copy for CategorySet<C> {}

impl<C> Clone for CategorySet<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> PartialEq for CategorySet<C> {
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
    }
}

impl<C> Eq for CategorySet<C> {}

impl<C> Default for CategorySet<C> {
    fn default() -> Self {
        Self::from_flags(RankFlags::empty())
    }
}

impl<C: Category> Debug for CategorySet<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<C> CategorySet<C> {
    const fn from_flags(flags: RankFlags) -> Self {
        Self {
            flags,
            ty: PhantomData,
        }
    }

    pub fn empty() -> Self {
        Self::from_flags(RankFlags::empty())
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.bits().count_ones() as usize
    }
}

impl<C: Category> CategorySet<C> {
    /// Every category `C` declares.
    pub fn all() -> Self {
        Self::from_flags(RankFlags::span(0, C::count().saturating_sub(1)))
    }

    /// The set holding just `category`, or an empty set if `category` ranks
    /// past [`MAX_CATEGORIES`].
    pub fn only(category: C) -> Self {
        Self::from_flags(RankFlags::of_rank(category.rank()).unwrap_or_default())
    }

    /// Every category of `C` that is not in `set`.
    pub fn not(set: CategorySet<C>) -> Self {
        Self::from_flags(Self::all().flags.difference(set.flags))
    }

    pub fn contains(&self, category: C) -> bool {
        RankFlags::of_rank(category.rank()).is_some_and(|flag| self.flags.contains(flag))
    }

    /// Categories ranked past [`MAX_CATEGORIES`] are ignored.
    pub fn insert(&mut self, category: C) {
        if let Some(flag) = RankFlags::of_rank(category.rank()) {
            self.flags.insert(flag);
        }
    }

    /// The categories in this set, smallest first.
    pub fn iter(&self) -> impl Iterator<Item = C> + '_ {
        C::iter().filter(|c| self.contains(*c))
    }
}

impl<C: Category> From<C> for CategorySet<C> {
    fn from(category: C) -> Self {
        Self::only(category)
    }
}

impl<C: Category> FromIterator<C> for CategorySet<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut set = Self::empty();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl<C> BitOr for CategorySet<C> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_flags(self.flags | rhs.flags)
    }
}

impl<C: Category> BitOr<C> for CategorySet<C> {
    type Output = Self;

    fn bitor(self, rhs: C) -> Self::Output {
        self | Self::only(rhs)
    }
}

/// The set of categories covered by `range`.
///
/// ```rust,ignore
/// let mid = range(ScreenSize::Sm..ScreenSize::Xl);
/// assert!(mid.contains(ScreenSize::Lg));
/// ```
pub fn range<C: Category, R: RangeBounds<C>>(range: R) -> CategorySet<C> {
    let lo = match range.start_bound() {
        Bound::Included(c) => c.rank(),
        Bound::Excluded(c) => c.rank() + 1,
        Bound::Unbounded => 0,
    };
    let hi = match range.end_bound() {
        Bound::Included(c) => c.rank(),
        Bound::Excluded(c) => match c.rank().checked_sub(1) {
            Some(hi) => hi,
            None => return CategorySet::empty(),
        },
        Bound::Unbounded => C::count().saturating_sub(1),
    };
    CategorySet::from_flags(RankFlags::span(lo, hi))
}

/// Implements `|` between two categories of a concrete [`Category`] type so
/// that `A | B` builds a [`CategorySet`].
macro_rules! category_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ::std::ops::BitOr for $ty {
                type Output = $crate::category::CategorySet<$ty>;

                fn bitor(self, rhs: Self) -> Self::Output {
                    $crate::category::CategorySet::only(self) | rhs
                }
            }
        )*
    };
}

pub(crate) use category_ops;
