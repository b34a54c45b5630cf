// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Configuration queries: key/value settings, shift and status
//! definitions, and required-staff targets.
//!
//! List settings (`departments`, `positions`, `machines`) are stored as a
//! single comma-joined value, the format the roster has always used.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::{required_staff, settings, shifts, statuses};
use crate::error::PersistenceError;
use workadm_domain::{
    EmployeeStatus, OverflowPolicy, ShiftCode, ShiftDefinition, StatusDefinition, parse_hhmm,
};

/// Setting key holding the overflow policy.
pub const OVERFLOW_POLICY_KEY: &str = "overflow_policy";
/// Setting key holding the comma-joined department list.
pub const DEPARTMENTS_KEY: &str = "departments";
/// Setting key holding the comma-joined position list.
pub const POSITIONS_KEY: &str = "positions";
/// Setting key holding the comma-joined machine list.
pub const MACHINES_KEY: &str = "machines";

#[derive(Queryable, Selectable)]
#[diesel(table_name = shifts)]
struct ShiftRow {
    shift_code: String,
    start_time: String,
    end_time: String,
    color: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = statuses)]
struct StatusRow {
    status_name: String,
    color: String,
}

/// Retrieves a raw setting value.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the key is
/// not set.
pub fn get_setting(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    let result: Result<String, diesel::result::Error> = settings::table
        .filter(settings::key.eq(key))
        .select(settings::value)
        .first(conn);

    match result {
        Ok(value) => Ok(Some(value)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a comma-joined list setting.
///
/// An unset key is an empty list. Empty segments are dropped so trailing
/// commas in hand-edited values do not produce phantom entries.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_list_setting(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Vec<String>, PersistenceError> {
    let value: Option<String> = get_setting(conn, key)?;
    Ok(value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect())
}

/// Reads the configured overflow policy.
///
/// An unset or unparseable value falls back to the default policy
/// (`warning`), matching the roster's historical behavior.
///
/// # Errors
///
/// Returns an error if the query itself fails.
pub fn get_overflow_policy(
    conn: &mut SqliteConnection,
) -> Result<OverflowPolicy, PersistenceError> {
    let value: Option<String> = get_setting(conn, OVERFLOW_POLICY_KEY)?;
    let policy: OverflowPolicy = value
        .and_then(|raw| OverflowPolicy::from_str(&raw).ok())
        .unwrap_or_default();
    debug!("Overflow policy: {}", policy);
    Ok(policy)
}

/// Loads every configured shift definition ordered by shift code.
///
/// # Errors
///
/// Returns an error if the query fails or a stored time string no longer
/// parses.
pub fn get_shift_definitions(
    conn: &mut SqliteConnection,
) -> Result<Vec<ShiftDefinition>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .order(shifts::shift_code.asc())
        .select(ShiftRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            Ok(ShiftDefinition::new(
                ShiftCode::normalize(&row.shift_code)?,
                parse_hhmm(&row.start_time)?,
                parse_hhmm(&row.end_time)?,
                row.color,
            ))
        })
        .collect()
}

/// Loads every configured status definition.
///
/// # Errors
///
/// Returns an error if the query fails or a stored status name no longer
/// parses.
pub fn get_status_definitions(
    conn: &mut SqliteConnection,
) -> Result<Vec<StatusDefinition>, PersistenceError> {
    let rows: Vec<StatusRow> = statuses::table
        .order(statuses::status_name.asc())
        .select(StatusRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            Ok(StatusDefinition::new(
                EmployeeStatus::from_str(&row.status_name)?,
                row.color,
            ))
        })
        .collect()
}

/// Reads the required headcount for a (department, shift) pair.
///
/// A pair with no stored row has no requirement and is unconstrained.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_required_staff(
    conn: &mut SqliteConnection,
    department: &str,
    shift: ShiftCode,
) -> Result<u32, PersistenceError> {
    let result: Result<i32, diesel::result::Error> = required_staff::table
        .filter(required_staff::department.eq(department))
        .filter(required_staff::shift.eq(shift.as_str()))
        .select(required_staff::required_count)
        .first(conn);

    match result {
        Ok(count) => Ok(u32::try_from(count).unwrap_or(0)),
        Err(diesel::result::Error::NotFound) => Ok(0),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every stored required-staff target.
///
/// # Errors
///
/// Returns an error if the query fails or a stored shift value no longer
/// parses.
pub fn list_required_staff(
    conn: &mut SqliteConnection,
) -> Result<Vec<(String, ShiftCode, u32)>, PersistenceError> {
    let rows: Vec<(String, String, i32)> = required_staff::table
        .order((required_staff::department.asc(), required_staff::shift.asc()))
        .select((
            required_staff::department,
            required_staff::shift,
            required_staff::required_count,
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|(department, shift, count)| {
            Ok((
                department,
                ShiftCode::normalize(&shift)?,
                u32::try_from(count).unwrap_or(0),
            ))
        })
        .collect()
}
