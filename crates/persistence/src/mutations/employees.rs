// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::diesel_schema::employees;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use workadm_domain::{Employee, EmployeeStatus, ShiftCode};

/// Inserts a new employee and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<i64, PersistenceError> {
    info!(
        "Inserting employee: {} ({} / {})",
        employee.full_name(),
        employee.department,
        employee.shift
    );

    diesel::insert_into(employees::table)
        .values((
            employees::first_name.eq(&employee.first_name),
            employees::last_name.eq(&employee.last_name),
            employees::position.eq(&employee.position),
            employees::department.eq(&employee.department),
            employees::shift.eq(employee.shift.as_str()),
            employees::status.eq(employee.status.as_str()),
            employees::machine.eq(&employee.machine),
        ))
        .execute(conn)?;

    let employee_id: i64 = get_last_insert_rowid(conn)?;
    info!(employee_id, "Employee inserted");
    Ok(employee_id)
}

/// Rewrites every field of an existing employee.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the id does not exist, or another error
/// if the update fails.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    debug!("Updating employee ID: {}", employee_id);

    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set((
            employees::first_name.eq(&employee.first_name),
            employees::last_name.eq(&employee.last_name),
            employees::position.eq(&employee.position),
            employees::department.eq(&employee.department),
            employees::shift.eq(employee.shift.as_str()),
            employees::status.eq(employee.status.as_str()),
            employees::machine.eq(&employee.machine),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}

/// Updates an employee's placement: department, shift, position.
///
/// Each field is optional; `None` leaves the stored value untouched. The
/// staffing engine's rebalance moves use this with only the shift set.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the id does not exist, or another error
/// if the update fails.
pub fn update_department_shift_position(
    conn: &mut SqliteConnection,
    employee_id: i64,
    department: Option<&str>,
    shift: Option<ShiftCode>,
    position: Option<&str>,
) -> Result<(), PersistenceError> {
    debug!(
        "Updating placement for employee ID {}: department={:?}, shift={:?}, position={:?}",
        employee_id, department, shift, position
    );

    // Diesel rejects an empty changeset.
    if department.is_none() && shift.is_none() && position.is_none() {
        return Ok(());
    }

    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set((
            department.map(|value| employees::department.eq(value.to_string())),
            shift.map(|value| employees::shift.eq(value.as_str().to_string())),
            position.map(|value| employees::position.eq(value.to_string())),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}

/// Updates an employee's working status.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the id does not exist, or another error
/// if the update fails.
pub fn update_status(
    conn: &mut SqliteConnection,
    employee_id: i64,
    status: EmployeeStatus,
) -> Result<(), PersistenceError> {
    debug!("Setting status of employee ID {} to {}", employee_id, status);

    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set(employees::status.eq(status.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}

/// Updates an employee's machine assignment.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the id does not exist, or another error
/// if the update fails.
pub fn update_machine(
    conn: &mut SqliteConnection,
    employee_id: i64,
    machine: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set(employees::machine.eq(machine))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}

/// Deletes an employee. Absence rows cascade; history rows stay.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the id does not exist, or another error
/// if the delete fails.
pub fn delete_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting employee ID: {}", employee_id);

    let deleted: usize = diesel::delete(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}
