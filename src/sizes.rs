//! The built-in category systems.
//!
//! - [`ScreenSize`]: the six-step width grid (`Xs` up to `Xxl`).
//! - [`DeviceScreenType`]: coarse device classes.
//! - [`SizeClass`]: five generic steps from extra small to extra large.
//! - [`RefinedSize`]: device classes split into small, normal, large and
//!   extra large steps.

use strum::{EnumIter, IntoStaticStr};

use crate::{
    category::{Category, category_ops},
    threshold::{CATCH_ALL, ThresholdTable},
};

/// Width breakpoints of the classic six-column grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum ScreenSize {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Category for ScreenSize {
    /// Width breakpoints in logical pixels
    fn default_thresholds() -> ThresholdTable<Self> {
        ThresholdTable::from_static(&[
            (ScreenSize::Xxl, 1400.0),
            (ScreenSize::Xl, 1200.0),
            (ScreenSize::Lg, 992.0),
            (ScreenSize::Md, 768.0),
            (ScreenSize::Sm, 576.0),
            (ScreenSize::Xs, CATCH_ALL),
        ])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum DeviceScreenType {
    Watch,
    Mobile,
    Tablet,
    Desktop,
}

impl Category for DeviceScreenType {
    fn default_thresholds() -> ThresholdTable<Self> {
        ThresholdTable::from_static(&[
            (DeviceScreenType::Desktop, 950.0),
            (DeviceScreenType::Tablet, 600.0),
            (DeviceScreenType::Mobile, 300.0),
            (DeviceScreenType::Watch, CATCH_ALL),
        ])
    }
}

/// Five steps not tied to a device class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum SizeClass {
    ExtraSmall,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Category for SizeClass {
    fn default_thresholds() -> ThresholdTable<Self> {
        ThresholdTable::from_static(&[
            (SizeClass::ExtraLarge, 1920.0),
            (SizeClass::Large, 950.0),
            (SizeClass::Medium, 600.0),
            (SizeClass::Small, 200.0),
            (SizeClass::ExtraSmall, CATCH_ALL),
        ])
    }
}

/// Each device class split into four steps, with `Watch` below them all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum RefinedSize {
    Watch,
    MobileSmall,
    MobileNormal,
    MobileLarge,
    MobileExtraLarge,
    TabletSmall,
    TabletNormal,
    TabletLarge,
    TabletExtraLarge,
    DesktopSmall,
    DesktopNormal,
    DesktopLarge,
    DesktopExtraLarge,
}

impl RefinedSize {
    /// The coarse device class this size belongs to.
    pub fn device_type(self) -> DeviceScreenType {
        use RefinedSize::*;
        match self {
            Watch => DeviceScreenType::Watch,
            MobileSmall | MobileNormal | MobileLarge | MobileExtraLarge => {
                DeviceScreenType::Mobile
            }
            TabletSmall | TabletNormal | TabletLarge | TabletExtraLarge => {
                DeviceScreenType::Tablet
            }
            DesktopSmall | DesktopNormal | DesktopLarge | DesktopExtraLarge => {
                DeviceScreenType::Desktop
            }
        }
    }
}

impl Category for RefinedSize {
    fn default_thresholds() -> ThresholdTable<Self> {
        use RefinedSize::*;
        ThresholdTable::from_static(&[
            (DesktopExtraLarge, 4096.0),
            (DesktopLarge, 3840.0),
            (DesktopNormal, 1920.0),
            (DesktopSmall, 950.0),
            (TabletExtraLarge, 900.0),
            (TabletLarge, 850.0),
            (TabletNormal, 768.0),
            (TabletSmall, 600.0),
            (MobileExtraLarge, 480.0),
            (MobileLarge, 414.0),
            (MobileNormal, 375.0),
            (MobileSmall, 320.0),
            (Watch, CATCH_ALL),
        ])
    }
}

category_ops!(ScreenSize, DeviceScreenType, SizeClass, RefinedSize);
