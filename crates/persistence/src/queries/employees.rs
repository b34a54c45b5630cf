// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::employees;
use crate::error::PersistenceError;
use workadm_domain::{Employee, EmployeeStatus, ShiftCode};

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeRow {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
    pub shift: String,
    pub status: String,
    pub machine: String,
}

impl EmployeeRow {
    /// Converts a stored row into the domain type.
    ///
    /// Shift values are normalized so rosters imported with historical
    /// descriptive strings still load.
    pub(crate) fn into_domain(self) -> Result<Employee, PersistenceError> {
        let shift: ShiftCode = ShiftCode::normalize(&self.shift)?;
        let status: EmployeeStatus = EmployeeStatus::from_str(&self.status)?;
        Ok(Employee::with_id(
            self.employee_id,
            self.first_name,
            self.last_name,
            self.position,
            self.department,
            shift,
            status,
            self.machine,
        ))
    }
}

/// Lists the whole roster ordered by ascending employee id.
///
/// # Errors
///
/// Returns an error if the query fails or a row holds a value that no
/// longer parses into its domain type.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;

    rows.into_iter().map(EmployeeRow::into_domain).collect()
}

/// Retrieves one employee by id.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the
/// employee does not exist.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    let result: Result<EmployeeRow, diesel::result::Error> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_domain()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the employees in a (department, shift) pair with the given
/// status, ordered by ascending employee id.
///
/// The ascending-id order is the seniority stand-in the staffing engine
/// relies on when choosing who to relocate.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn employees_in(
    conn: &mut SqliteConnection,
    department: &str,
    shift: ShiftCode,
    status: EmployeeStatus,
) -> Result<Vec<Employee>, PersistenceError> {
    debug!(
        "Listing employees in department={}, shift={}, status={}",
        department, shift, status
    );

    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::department.eq(department))
        .filter(employees::shift.eq(shift.as_str()))
        .filter(employees::status.eq(status.as_str()))
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;

    rows.into_iter().map(EmployeeRow::into_domain).collect()
}
