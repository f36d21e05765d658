//! Effective-from versioning shared by every rate table.
//!
//! Country schedules, home-jurisdiction band sets and FX rates all follow the
//! same rule: a version holds from its `effective_from` date until a later
//! version supersedes it. [`Timeline`] implements that rule once.

use chrono::NaiveDate;

/// A value that becomes effective on a given date.
pub trait EffectiveFrom {
    /// The first date on which this version applies.
    fn effective_from(&self) -> NaiveDate;
}

/// A non-empty list of versions sorted ascending by `effective_from`.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<T> {
    versions: Vec<T>,
}

impl<T: EffectiveFrom> Timeline<T> {
    /// Builds a timeline from unordered versions.
    ///
    /// Returns `None` when `versions` is empty, since an empty timeline can
    /// never answer a lookup.
    pub fn new(mut versions: Vec<T>) -> Option<Self> {
        if versions.is_empty() {
            return None;
        }
        versions.sort_by_key(|v| v.effective_from());
        Some(Self { versions })
    }

    /// Returns the version with the latest `effective_from` not after `on_date`.
    ///
    /// On a miss, the error carries the earliest known effective date so
    /// callers can report a precise diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use per_diem_engine::config::{EffectiveFrom, Timeline};
    ///
    /// struct Version(NaiveDate);
    ///
    /// impl EffectiveFrom for Version {
    ///     fn effective_from(&self) -> NaiveDate {
    ///         self.0
    ///     }
    /// }
    ///
    /// let jan = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    /// let jul = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
    /// let timeline = Timeline::new(vec![Version(jul), Version(jan)]).unwrap();
    ///
    /// let june = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    /// assert_eq!(timeline.as_of(june).unwrap().0, jan);
    /// assert_eq!(timeline.as_of(jul).unwrap().0, jul);
    ///
    /// let before = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    /// assert_eq!(timeline.as_of(before).err(), Some(jan));
    /// ```
    pub fn as_of(&self, on_date: NaiveDate) -> Result<&T, NaiveDate> {
        self.versions
            .iter()
            .rfind(|v| v.effective_from() <= on_date)
            .ok_or_else(|| self.earliest())
    }

    /// The earliest effective date in this timeline.
    pub fn earliest(&self) -> NaiveDate {
        self.versions[0].effective_from()
    }

    /// All versions, oldest first.
    pub fn versions(&self) -> &[T] {
        &self.versions
    }
}
