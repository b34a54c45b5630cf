// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// The kind of a recorded absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbsenceKind {
    /// A planned vacation.
    Vacation,
    /// A sick-leave (L4) period.
    SickLeave,
}

impl AbsenceKind {
    /// Converts this kind to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vacation => "Vacation",
            Self::SickLeave => "SickLeave",
        }
    }
}

impl std::fmt::Display for AbsenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded vacation or sick-leave period for one employee.
///
/// The day count is derived at construction and is inclusive of both
/// endpoints. An employee with an active absence is normally not counted
/// as working for staffing purposes, and the daily status refresh skips
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    /// Canonical identifier; `None` until first persisted.
    pub record_id: Option<i64>,
    /// The employee this absence belongs to.
    pub employee_id: i64,
    /// The kind of absence.
    pub kind: AbsenceKind,
    /// First day of the absence.
    pub start_date: Date,
    /// Last day of the absence (inclusive).
    pub end_date: Date,
    /// Inclusive day count, derived from the date range.
    pub total_days: u32,
}

impl AbsenceRecord {
    /// Creates a new absence record without a persisted id.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The employee the absence belongs to
    /// * `kind` - The kind of absence
    /// * `start_date` - First day of the absence
    /// * `end_date` - Last day of the absence (inclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` is before
    /// `start_date`.
    pub fn new(
        employee_id: i64,
        kind: AbsenceKind,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self, DomainError> {
        let total_days: u32 = inclusive_day_count(start_date, end_date)?;
        Ok(Self {
            record_id: None,
            employee_id,
            kind,
            start_date,
            end_date,
            total_days,
        })
    }

    /// Creates an absence record with an existing persisted id.
    ///
    /// # Arguments
    ///
    /// * `record_id` - The canonical identifier
    /// * `employee_id` - The employee the absence belongs to
    /// * `kind` - The kind of absence
    /// * `start_date` - First day of the absence
    /// * `end_date` - Last day of the absence (inclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` is before
    /// `start_date`.
    pub fn with_id(
        record_id: i64,
        employee_id: i64,
        kind: AbsenceKind,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self, DomainError> {
        let total_days: u32 = inclusive_day_count(start_date, end_date)?;
        Ok(Self {
            record_id: Some(record_id),
            employee_id,
            kind,
            start_date,
            end_date,
            total_days,
        })
    }

    /// Returns whether this absence covers the given date.
    #[must_use]
    pub fn is_active_on(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Counts the days in an inclusive date range.
fn inclusive_day_count(start: Date, end: Date) -> Result<u32, DomainError> {
    if end < start {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    let days: i64 = (end - start).whole_days() + 1;
    Ok(u32::try_from(days).unwrap_or(0))
}
