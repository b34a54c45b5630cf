// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacation and sick-leave queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use time::macros::format_description;

use crate::diesel_schema::{sick_leave, vacations};
use crate::error::PersistenceError;
use workadm_domain::{AbsenceKind, AbsenceRecord};

pub(crate) const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub(crate) fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| PersistenceError::CorruptValue(e.to_string()))
}

fn row_to_record(
    kind: AbsenceKind,
    record_id: i64,
    employee_id: i64,
    start_date: &str,
    end_date: &str,
) -> Result<AbsenceRecord, PersistenceError> {
    let start: Date = parse_date(start_date)?;
    let end: Date = parse_date(end_date)?;
    Ok(AbsenceRecord::with_id(record_id, employee_id, kind, start, end)?)
}

/// Lists every absence recorded for an employee, vacations first.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date no longer parses.
pub fn absences_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<AbsenceRecord>, PersistenceError> {
    let vacation_rows: Vec<(i64, i64, String, String)> = vacations::table
        .filter(vacations::employee_id.eq(employee_id))
        .order(vacations::start_date.asc())
        .select((
            vacations::vacation_id,
            vacations::employee_id,
            vacations::start_date,
            vacations::end_date,
        ))
        .load(conn)?;

    let sick_rows: Vec<(i64, i64, String, String)> = sick_leave::table
        .filter(sick_leave::employee_id.eq(employee_id))
        .order(sick_leave::start_date.asc())
        .select((
            sick_leave::record_id,
            sick_leave::employee_id,
            sick_leave::start_date,
            sick_leave::end_date,
        ))
        .load(conn)?;

    let mut records: Vec<AbsenceRecord> = Vec::with_capacity(vacation_rows.len() + sick_rows.len());
    for (id, employee, start, end) in vacation_rows {
        records.push(row_to_record(AbsenceKind::Vacation, id, employee, &start, &end)?);
    }
    for (id, employee, start, end) in sick_rows {
        records.push(row_to_record(AbsenceKind::SickLeave, id, employee, &start, &end)?);
    }
    Ok(records)
}

/// Returns whether an employee has any absence covering the given date.
///
/// Drives the daily status refresh, which must not overwrite the status
/// of an employee who is away.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date no longer parses.
pub fn has_active_absence(
    conn: &mut SqliteConnection,
    employee_id: i64,
    date: Date,
) -> Result<bool, PersistenceError> {
    let records: Vec<AbsenceRecord> = absences_for_employee(conn, employee_id)?;
    Ok(records.iter().any(|record| record.is_active_on(date)))
}
