// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Time;

/// A single-letter shift designator.
///
/// Shifts are domain constants A through D. Historically the roster stored
/// descriptive strings such as `"A-06:00-14:00"`; [`ShiftCode::normalize`]
/// accepts those by taking the leading letter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ShiftCode {
    /// Shift A.
    A,
    /// Shift B.
    B,
    /// Shift C.
    C,
    /// Shift D.
    D,
}

impl FromStr for ShiftCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(DomainError::InvalidShiftCode(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ShiftCode {
    /// All shift codes in ascending order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Converts this shift code to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Extracts a shift code from any historical shift string.
    ///
    /// The value is trimmed and uppercased and the leading character is
    /// matched against the configured letters, so both `"b"` and
    /// `"B-14:00-22:00"` normalize to [`ShiftCode::B`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShiftCode` if the leading character is
    /// not one of A-D.
    pub fn normalize(value: &str) -> Result<Self, DomainError> {
        let trimmed: String = value.trim().to_uppercase();
        match trimmed.chars().next() {
            Some('A') => Ok(Self::A),
            Some('B') => Ok(Self::B),
            Some('C') => Ok(Self::C),
            Some('D') => Ok(Self::D),
            _ => Err(DomainError::InvalidShiftCode(value.to_string())),
        }
    }
}

/// Parses a wall-clock `HH:MM` string into a [`Time`].
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeOfDay` if the string is not a valid
/// `HH:MM` value.
pub fn parse_hhmm(value: &str) -> Result<Time, DomainError> {
    let trimmed: &str = value.trim();
    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| DomainError::InvalidTimeOfDay(value.to_string()))?;
    let hours: u8 = hours
        .parse()
        .map_err(|_| DomainError::InvalidTimeOfDay(value.to_string()))?;
    let minutes: u8 = minutes
        .parse()
        .map_err(|_| DomainError::InvalidTimeOfDay(value.to_string()))?;
    Time::from_hms(hours, minutes, 0).map_err(|_| DomainError::InvalidTimeOfDay(value.to_string()))
}

/// A configured shift: its code, wall-clock window, and display color.
///
/// The window may wrap past midnight (e.g. `22:00` - `06:00`). A shift
/// whose start and end both equal midnight is the "off" shift and is
/// excluded from all staffing accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// The shift code this definition describes.
    pub code: ShiftCode,
    /// Wall-clock start of the shift.
    pub start: Time,
    /// Wall-clock end of the shift (may be earlier than `start` when the
    /// shift wraps past midnight).
    pub end: Time,
    /// Display color used by the UI layer (opaque to the engine).
    pub color: String,
}

impl ShiftDefinition {
    /// Creates a new `ShiftDefinition`.
    ///
    /// # Arguments
    ///
    /// * `code` - The shift code
    /// * `start` - Wall-clock start time
    /// * `end` - Wall-clock end time
    /// * `color` - Display color
    #[must_use]
    pub const fn new(code: ShiftCode, start: Time, end: Time, color: String) -> Self {
        Self {
            code,
            start,
            end,
            color,
        }
    }

    /// Returns whether this is the designated "off" shift.
    ///
    /// The off shift has start == end == midnight. It is never a staffing
    /// requirement target, never a rebalancing destination, and never
    /// alerted on.
    #[must_use]
    pub fn is_off_shift(&self) -> bool {
        self.start == Time::MIDNIGHT && self.end == Time::MIDNIGHT
    }

    /// Returns whether this shift's window wraps past midnight.
    #[must_use]
    pub fn wraps_past_midnight(&self) -> bool {
        !self.is_off_shift() && self.end <= self.start
    }

    /// Renders the historical display name for this shift.
    ///
    /// Produces `"A-06:00-14:00"` for a regular shift and `"D- Off"` for
    /// the off shift, matching what the roster UI shows.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_off_shift() {
            format!("{}- Off", self.code)
        } else {
            format!(
                "{}-{:02}:{:02}-{:02}:{:02}",
                self.code,
                self.start.hour(),
                self.start.minute(),
                self.end.hour(),
                self.end.minute()
            )
        }
    }
}
