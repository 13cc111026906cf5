// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar utilities.
//!
//! All dates are calendar days without a time component. Ranges are
//! inclusive on both ends.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid ISO date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    Date::parse(trimmed, ISO_DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    // Display renders the same shape for four-digit years.
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serde adapter that reads and writes dates as `YYYY-MM-DD` strings.
pub mod iso_date {
    use super::{format_iso_date, parse_iso_date};
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso_date(*date))
    }

    /// Deserializes a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a string or not a valid ISO date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: String = String::deserialize(deserializer)?;
        parse_iso_date(&raw).map_err(serde::de::Error::custom)
    }

    /// Same adapter for optional dates.
    pub mod option {
        use super::super::{format_iso_date, parse_iso_date};
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        /// Serializes an optional date as `YYYY-MM-DD` or `null`.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        #[allow(clippy::ref_option)]
        pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => serializer.serialize_str(&format_iso_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional `YYYY-MM-DD` string.
        ///
        /// # Errors
        ///
        /// Fails if a present value is not a valid ISO date.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|value| parse_iso_date(&value).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(with = "iso_date")]
    start: Date,
    #[serde(with = "iso_date")]
    end: Date,
}

impl DateRange {
    /// Creates a new inclusive range.
    ///
    /// # Arguments
    ///
    /// * `start` - First day of the range
    /// * `end` - Last day of the range
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `end` precedes `start`.
    pub const fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        // Rule: a range is never empty; a single day has start == end
        if end.to_julian_day() < start.to_julian_day() {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    #[must_use]
    pub const fn single(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns whether the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns the days shared by both ranges, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start: Date = self.start.max(other.start);
        let end: Date = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Iterates over every day of the range in order.
    #[must_use]
    pub const fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }

    /// Number of days in the range (at least 1).
    #[must_use]
    pub fn len_days(&self) -> i64 {
        i64::from(self.end.to_julian_day()) - i64::from(self.start.to_julian_day()) + 1
    }
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<Date>,
    end: Date,
}

impl Iterator for Days {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let current: Date = self.next.filter(|date| *date <= self.end)?;
        self.next = current.next_day();
        Some(current)
    }
}
