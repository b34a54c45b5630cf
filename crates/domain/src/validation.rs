// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::employee::Employee;
use crate::error::DomainError;

/// Validates the free-form fields of an employee.
///
/// First name, last name, and department must be non-empty after trimming.
/// Position and machine may be empty (the original roster allows
/// unassigned equipment).
///
/// # Arguments
///
/// * `employee` - The employee to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidEmployeeField` naming the first field that
/// failed validation.
pub fn validate_employee_fields(employee: &Employee) -> Result<(), DomainError> {
    if employee.first_name.trim().is_empty() {
        return Err(DomainError::InvalidEmployeeField {
            field: "first_name",
            reason: String::from("must not be empty"),
        });
    }
    if employee.last_name.trim().is_empty() {
        return Err(DomainError::InvalidEmployeeField {
            field: "last_name",
            reason: String::from("must not be empty"),
        });
    }
    if employee.department.trim().is_empty() {
        return Err(DomainError::InvalidEmployeeField {
            field: "department",
            reason: String::from("must not be empty"),
        });
    }
    Ok(())
}
