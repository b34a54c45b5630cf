// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::shift::{ShiftCode, ShiftDefinition};
use crate::status::EmployeeStatus;
use serde::{Deserialize, Serialize};

/// An employee on the roster.
///
/// `employee_id` is the canonical identifier assigned by the database; its
/// ascending order doubles as the documented seniority stand-in used by
/// the rebalance algorithm (earliest-added employees keep their shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Canonical identifier; `None` until first persisted.
    pub employee_id: Option<i64>,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's position (free-form, administrator-configured list).
    pub position: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The shift the employee is assigned to.
    pub shift: ShiftCode,
    /// The employee's working status.
    pub status: EmployeeStatus,
    /// Assigned machine/equipment (free-form, may be empty).
    pub machine: String,
}

impl Employee {
    /// Creates a new `Employee` without a persisted id.
    ///
    /// # Arguments
    ///
    /// * `first_name` - The employee's first name
    /// * `last_name` - The employee's last name
    /// * `position` - The employee's position
    /// * `department` - The department
    /// * `shift` - The assigned shift
    /// * `status` - The working status
    /// * `machine` - The assigned machine (may be empty)
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        first_name: String,
        last_name: String,
        position: String,
        department: String,
        shift: ShiftCode,
        status: EmployeeStatus,
        machine: String,
    ) -> Self {
        Self {
            employee_id: None,
            first_name,
            last_name,
            position,
            department,
            shift,
            status,
            machine,
        }
    }

    /// Creates an `Employee` with an existing persisted id.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The canonical identifier
    /// * `first_name` - The employee's first name
    /// * `last_name` - The employee's last name
    /// * `position` - The employee's position
    /// * `department` - The department
    /// * `shift` - The assigned shift
    /// * `status` - The working status
    /// * `machine` - The assigned machine
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        employee_id: i64,
        first_name: String,
        last_name: String,
        position: String,
        department: String,
        shift: ShiftCode,
        status: EmployeeStatus,
        machine: String,
    ) -> Self {
        Self {
            employee_id: Some(employee_id),
            first_name,
            last_name,
            position,
            department,
            shift,
            status,
            machine,
        }
    }

    /// Returns the employee's full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Derives the status a shift assignment implies.
///
/// Assigning the off shift (start == end == midnight) puts the employee on
/// `Free`; assigning any other configured shift puts them on `Working`.
/// A shift with no definition leaves the current status untouched.
///
/// # Arguments
///
/// * `shift` - The shift being assigned
/// * `definitions` - The configured shift definitions
/// * `current` - The employee's current status
#[must_use]
pub fn status_for_shift(
    shift: ShiftCode,
    definitions: &[ShiftDefinition],
    current: EmployeeStatus,
) -> EmployeeStatus {
    definitions
        .iter()
        .find(|definition| definition.code == shift)
        .map_or(current, |definition| {
            if definition.is_off_shift() {
                EmployeeStatus::Free
            } else {
                EmployeeStatus::Working
            }
        })
}
