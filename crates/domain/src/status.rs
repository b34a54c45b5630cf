// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The working state of an employee.
///
/// Only employees with status `Working` count toward the staffing
/// headcount of a (department, shift) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeStatus {
    /// On shift and counted toward staffing requirements.
    #[default]
    Working,
    /// On a recorded vacation; not counted as working.
    OnVacation,
    /// On a recorded sick-leave (L4) period; not counted as working.
    OnSickLeave,
    /// Off shift; not counted as working.
    Free,
}

impl FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Working" => Ok(Self::Working),
            "OnVacation" => Ok(Self::OnVacation),
            "OnSickLeave" => Ok(Self::OnSickLeave),
            "Free" => Ok(Self::Free),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EmployeeStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "Working",
            Self::OnVacation => "OnVacation",
            Self::OnSickLeave => "OnSickLeave",
            Self::Free => "Free",
        }
    }

    /// Returns whether this status counts toward staffing headcount.
    #[must_use]
    pub const fn counts_as_working(&self) -> bool {
        matches!(self, Self::Working)
    }
}

/// A configured employee status with its display color.
///
/// Status definitions are administrator-configured; the staffing engine
/// only reads the status name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    /// The status this definition describes.
    pub status: EmployeeStatus,
    /// Display color used by the UI layer (opaque to the engine).
    pub color: String,
}

impl StatusDefinition {
    /// Creates a new `StatusDefinition`.
    ///
    /// # Arguments
    ///
    /// * `status` - The status being configured
    /// * `color` - The display color
    #[must_use]
    pub const fn new(status: EmployeeStatus, color: String) -> Self {
        Self { status, color }
    }
}
