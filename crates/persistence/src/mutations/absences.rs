// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacation and sick-leave mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::{sick_leave, vacations};
use crate::error::PersistenceError;
use crate::queries::absences::DATE_FORMAT;
use crate::sqlite::get_last_insert_rowid;
use workadm_domain::{AbsenceKind, AbsenceRecord};

fn format_date(date: time::Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Inserts an absence record and returns its id.
///
/// The record's kind selects the target table.
///
/// # Errors
///
/// Returns an error if the insert fails or the employee does not exist.
pub fn insert_absence(
    conn: &mut SqliteConnection,
    record: &AbsenceRecord,
) -> Result<i64, PersistenceError> {
    let start: String = format_date(record.start_date)?;
    let end: String = format_date(record.end_date)?;
    let total_days: i32 = i32::try_from(record.total_days).unwrap_or(i32::MAX);

    info!(
        "Recording {} for employee ID {}: {} to {} ({} days)",
        record.kind, record.employee_id, start, end, record.total_days
    );

    match record.kind {
        AbsenceKind::Vacation => {
            diesel::insert_into(vacations::table)
                .values((
                    vacations::employee_id.eq(record.employee_id),
                    vacations::start_date.eq(&start),
                    vacations::end_date.eq(&end),
                    vacations::total_days.eq(total_days),
                ))
                .execute(conn)?;
        }
        AbsenceKind::SickLeave => {
            diesel::insert_into(sick_leave::table)
                .values((
                    sick_leave::employee_id.eq(record.employee_id),
                    sick_leave::start_date.eq(&start),
                    sick_leave::end_date.eq(&end),
                    sick_leave::total_days.eq(total_days),
                ))
                .execute(conn)?;
        }
    }

    get_last_insert_rowid(conn)
}

/// Deletes one absence record.
///
/// # Errors
///
/// Returns `NotFound` if the record does not exist, or another error if
/// the delete fails.
pub fn delete_absence(
    conn: &mut SqliteConnection,
    kind: AbsenceKind,
    record_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = match kind {
        AbsenceKind::Vacation => diesel::delete(vacations::table)
            .filter(vacations::vacation_id.eq(record_id))
            .execute(conn)?,
        AbsenceKind::SickLeave => diesel::delete(sick_leave::table)
            .filter(sick_leave::record_id.eq(record_id))
            .execute(conn)?,
    };

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "{kind} record {record_id}"
        )));
    }
    Ok(())
}
