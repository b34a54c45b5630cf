// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Shift code is not one of the configured letters.
    InvalidShiftCode(String),
    /// Employee status string is not recognized.
    InvalidStatus(String),
    /// Overflow policy string is not recognized.
    InvalidPolicy(String),
    /// Wall-clock time string could not be parsed as `HH:MM`.
    InvalidTimeOfDay(String),
    /// Absence date range has the end before the start.
    InvalidDateRange {
        /// The start date of the range.
        start: Date,
        /// The end date of the range.
        end: Date,
    },
    /// An employee field failed validation.
    InvalidEmployeeField {
        /// The field that was invalid.
        field: &'static str,
        /// Why the field was rejected.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShiftCode(value) => {
                write!(f, "Invalid shift code: '{value}'. Expected A, B, C, or D")
            }
            Self::InvalidStatus(value) => write!(f, "Invalid employee status: '{value}'"),
            Self::InvalidPolicy(value) => write!(f, "Invalid overflow policy: '{value}'"),
            Self::InvalidTimeOfDay(value) => {
                write!(f, "Invalid time of day: '{value}'. Expected HH:MM")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: end {end} is before start {start}")
            }
            Self::InvalidEmployeeField { field, reason } => {
                write!(f, "Invalid employee field '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
