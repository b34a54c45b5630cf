// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator contracts the engine depends on.
//!
//! The persistence crate implements all three traits on its adapter; the
//! engine tests implement them on an in-memory store.

use crate::error::StoreError;
use workadm_audit::HistoryEntry;
use workadm_domain::{Employee, EmployeeStatus, OverflowPolicy, ShiftCode, ShiftDefinition};

/// Read and update access to the employee roster.
pub trait EmployeeStore {
    /// Lists the full roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError>;

    /// Lists the employees in a (department, shift) pair with the given
    /// status, ordered by ascending employee id.
    ///
    /// The ascending-id order is a contract, not an accident: it is the
    /// documented seniority stand-in the rebalance algorithm relies on.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn employees_in(
        &mut self,
        department: &str,
        shift: ShiftCode,
        status: EmployeeStatus,
    ) -> Result<Vec<Employee>, StoreError>;

    /// Updates any combination of department, shift, and position for one
    /// employee. `None` leaves the field unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the mutation
    /// fails.
    fn update_department_shift_position(
        &mut self,
        employee_id: i64,
        department: Option<&str>,
        shift: Option<ShiftCode>,
        position: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Updates one employee's working status.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the mutation
    /// fails.
    fn update_status(&mut self, employee_id: i64, status: EmployeeStatus)
    -> Result<(), StoreError>;

    /// Deletes one employee from the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    fn delete(&mut self, employee_id: i64) -> Result<(), StoreError>;
}

/// Read access to the administrator-configured settings.
pub trait SettingsStore {
    /// Returns the required headcount for a (department, shift) pair.
    ///
    /// Zero means no requirement is configured (unconstrained).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn required_staff(&mut self, department: &str, shift: ShiftCode) -> Result<u32, StoreError>;

    /// Returns the configured shift definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn shift_definitions(&mut self) -> Result<Vec<ShiftDefinition>, StoreError>;

    /// Returns the current overflow policy.
    ///
    /// Read fresh before every risky mutation so a runtime change takes
    /// effect on the next staffing-affecting action.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn overflow_policy(&mut self) -> Result<OverflowPolicy, StoreError>;

    /// Returns the configured department names.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn departments(&mut self) -> Result<Vec<String>, StoreError>;
}

/// Append-only sink for history entries.
///
/// The engine's callers append exactly one entry per mutating decision;
/// nothing ever reads the log back through this trait.
pub trait AuditSink {
    /// Appends one history entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be appended.
    fn log(&mut self, entry: &HistoryEntry) -> Result<(), StoreError>;
}
